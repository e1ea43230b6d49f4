use super::ui;
use crate::core::CityReport;
use comfy_table::Cell;

pub fn render(report: &CityReport) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("House in BTC")]);

    for point in &report.ratios {
        table.add_row(vec![
            Cell::new(ui::date_label(point.date, report.mode)),
            ui::number_cell(format!("{:.2}", point.ratio)),
        ]);
    }

    let mut output = format!(
        "{} house price in BTC ({} view)\n\n",
        ui::style_text(&report.city.display_name(), ui::StyleType::Title),
        report.mode
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("Current ratio:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2} BTC", report.current_ratio),
            ui::StyleType::TotalValue
        )
    ));

    if report.dropped > 0 {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "{} housing observations had no Bitcoin price for their month",
                    report.dropped
                ),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

pub fn display(report: &CityReport) {
    println!("{}", render(report));
}
