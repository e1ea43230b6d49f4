use super::ui;
use crate::core::CityReport;
use comfy_table::Cell;

pub fn render(report: &CityReport, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("House ({currency})")),
        ui::header_cell(&format!("Bitcoin ({currency})")),
        ui::header_cell("House in BTC"),
    ]);

    // ratios are derived one-to-one from the windowed prices
    for (point, ratio) in report.prices.iter().zip(&report.ratios) {
        table.add_row(vec![
            Cell::new(ui::date_label(point.date, report.mode)),
            ui::number_cell(ui::format_amount(point.housing_price)),
            ui::number_cell(ui::format_amount(point.bitcoin_price)),
            ui::number_cell(format!("{:.2}", ratio.ratio)),
        ]);
    }

    let mut output = format!(
        "{} housing vs Bitcoin ({} view)\n\n",
        ui::style_text(&report.city.display_name(), ui::StyleType::Title),
        report.mode
    );
    output.push_str(&format!(
        "{} {}\n{} {}\n\n",
        ui::style_text(&format!("House ({currency}):"), ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_amount(report.current_housing_price),
            ui::StyleType::TotalValue
        ),
        ui::style_text(&format!("Bitcoin ({currency}):"), ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_amount(report.current_bitcoin_price),
            ui::StyleType::TotalValue
        ),
    ));
    output.push_str(&table.to_string());
    output
}

pub fn display(report: &CityReport, currency: &str) {
    println!("{}", render(report, currency));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{City, PricePoint, ReportRequest, TimeSeries, ViewMode, build_report};
    use chrono::NaiveDate;

    #[test]
    fn test_render_dual_series() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let housing: TimeSeries = vec![PricePoint::new(date(2024, 5, 1), 750_000.0)]
            .into_iter()
            .collect();
        let bitcoin: TimeSeries = vec![PricePoint::new(date(2024, 5, 1), 100_000.0)]
            .into_iter()
            .collect();
        let request = ReportRequest {
            city: City::Perth,
            mode: ViewMode::Recent,
            reference_date: date(2024, 6, 15),
            history_days: 365,
        };
        let report = build_report(&request, &housing, &bitcoin, Some(150_000.0)).unwrap();
        let output = render(&report, "AUD");

        assert!(output.contains("Perth"));
        assert!(output.contains("House (AUD)"));
        assert!(output.contains("750,000.00"));
        assert!(output.contains("100,000.00"));
        assert!(output.contains("150,000.00"));
        assert!(output.contains("7.50"));
        assert!(output.contains("5.00"));
    }
}
