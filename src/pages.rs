//! HTML for the form and results pages

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::pipeline::TemperatureReport;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2em auto;padding:0 1em}\
.error{color:#a40000;background:#fdecea;padding:.5em 1em;border-radius:4px}\
table{border-collapse:collapse;width:100%}th,td{border:1px solid #ddd;padding:4px 8px;text-align:right}\
tr:nth-child(even){background:#f6f6f6}img{max-width:100%}";

/// Escape text for use in HTML element content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// The search form, with an optional message from a rejected submission
#[must_use]
pub fn index_page(error: Option<&str>, default_days: u32, max_days: u32) -> String {
    let error = error
        .filter(|message| !message.is_empty())
        .map(|message| format!("<p class=\"error\">{}</p>\n", escape_html(message)))
        .unwrap_or_default();

    let body = format!(
        "<h1>Past temperatures</h1>\n{error}\
         <form method=\"post\" action=\"/\">\n\
         <label>City <input type=\"text\" name=\"city\" required></label>\n\
         <label>Days <input type=\"number\" name=\"days\" min=\"1\" max=\"{max_days}\" value=\"{default_days}\"></label>\n\
         <button type=\"submit\">Show</button>\n</form>"
    );
    layout("Past temperatures", &body)
}

/// Chart, table and CSV link for a finished report
#[must_use]
pub fn results_page(report: &TemperatureReport, days: u32) -> String {
    let city = &report.location.name;
    let chart = format!("data:image/png;base64,{}", STANDARD.encode(&report.chart_png));
    let csv_link = format!(
        "/download_csv?city={}&days={days}",
        urlencoding::encode(city)
    );

    let mut table = String::from(
        "<table>\n<thead><tr><th>date</th><th>max_temp</th><th>min_temp</th><th>avg_temp</th></tr></thead>\n<tbody>\n",
    );
    for row in &report.rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.date.format("%Y-%m-%d"),
            format_temperature(row.max_temp),
            format_temperature(row.min_temp),
            format_temperature(row.avg_temp),
        ));
    }
    table.push_str("</tbody>\n</table>");

    let body = format!(
        "<h1>{city} - past {days} days</h1>\n\
         <p>Coordinates: {coordinates}</p>\n\
         <img src=\"{chart}\" alt=\"Temperature chart for {city}\">\n\
         <p><a href=\"{csv_link}\">Download CSV</a> | <a href=\"/\">New search</a></p>\n\
         {table}",
        city = escape_html(city),
        coordinates = report.location.coordinates.format(),
        csv_link = escape_html(&csv_link),
    );
    layout(&format!("{city} temperatures"), &body)
}

/// Two decimals, or an empty cell when the value is missing
fn format_temperature(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}
