//! Plain HTML rendering for the three pages.

use crate::core::catalog::CurrencyCatalog;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

pub fn index_page(catalog: &CurrencyCatalog) -> String {
    let mut items = String::new();
    for (code, info) in catalog {
        items.push_str(&format!(
            "<li><a href=\"/{code}\">{code}</a> {}</li>\n",
            escape(&info.description),
            code = escape(code),
        ));
    }
    layout("Currencies", &format!("<ul>\n{items}</ul>"))
}

pub fn currency_page(from: &str, catalog: &CurrencyCatalog) -> String {
    let from = escape(from);
    let mut items = String::new();
    for (code, info) in catalog {
        items.push_str(&format!(
            "<li><a href=\"/{from}/{code}\">{from} to {code}</a> {}</li>\n",
            escape(&info.description),
            code = escape(code),
        ));
    }
    layout(
        &format!("Convert {from}"),
        &format!("<p>Pick a target currency for {from}.</p>\n<ul>\n{items}</ul>"),
    )
}

pub fn conversion_page(from: &str, to: &str, rate: f64) -> String {
    let from = escape(from);
    let to = escape(to);
    layout(
        &format!("{from} to {to}"),
        &format!("<p>1 {from} = <strong>{rate}</strong> {to}</p>\n<p><a href=\"/\">All currencies</a></p>"),
    )
}
