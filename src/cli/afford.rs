use super::ui;
use crate::core::City;
use crate::core::affordability::{Affordability, DEPOSIT_RATE, SAVINGS_RATE};
use comfy_table::Cell;

pub fn render(city: City, result: &Affordability, savings: f64, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Amount")]);

    let rows = [
        (
            format!("House price ({currency})"),
            ui::format_amount(result.house_price),
        ),
        (
            format!("Deposit, {:.0}% ({currency})", DEPOSIT_RATE * 100.0),
            ui::format_amount(result.deposit),
        ),
        ("Deposit (BTC)".to_string(), format!("{:.2}", result.deposit_btc)),
        (format!("Savings ({currency})"), ui::format_amount(savings)),
        (
            format!("Saved per year, {:.0}% of salary ({currency})", SAVINGS_RATE * 100.0),
            ui::format_amount(result.annual_saving),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), ui::number_cell(value)]);
    }

    let mut output = format!(
        "Buying in {}\n\n",
        ui::style_text(&city.display_name(), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    let verdict = match result.years_to_save {
        0 => "Savings already cover the deposit".to_string(),
        1 => "1 year".to_string(),
        n => format!("{n} years"),
    };
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("Time to save the deposit:", ui::StyleType::TotalLabel),
        ui::style_text(&verdict, ui::StyleType::TotalValue)
    ));
    output
}

pub fn display(city: City, result: &Affordability, savings: f64, currency: &str) {
    println!("{}", render(city, result, savings, currency));
}
