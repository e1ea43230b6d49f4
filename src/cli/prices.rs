use super::ui;
use crate::core::City;
use crate::core::ratio::ratio;
use chrono::NaiveDate;
use comfy_table::Cell;

pub fn render(
    reference: NaiveDate,
    bitcoin_price: f64,
    housing: &[(City, f64)],
    currency: &str,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("City"),
        ui::header_cell(&format!("Median price ({currency})")),
        ui::header_cell("In BTC"),
    ]);

    for (city, price) in housing {
        let in_btc = ratio(*price, bitcoin_price, reference).ok();
        table.add_row(vec![
            Cell::new(city.display_name()),
            ui::number_cell(ui::format_amount(*price)),
            ui::format_optional_cell(in_btc, |r| format!("{r:.2}")),
        ]);
    }

    let mut output = format!(
        "Prices as of {}\n\n",
        ui::style_text(&reference.to_string(), ui::StyleType::Title)
    );
    output.push_str(&format!(
        "Bitcoin ({}): {}\n\n",
        ui::style_text(currency, ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(bitcoin_price), ui::StyleType::TotalValue)
    ));
    output.push_str(&table.to_string());
    output
}

pub fn display(reference: NaiveDate, bitcoin_price: f64, housing: &[(City, f64)], currency: &str) {
    println!("{}", render(reference, bitcoin_price, housing, currency));
}
