use crate::domain::Product;

pub static CURRENCY_SYMBOL: &str = "$";
pub static IMAGE_LABEL: &str = "Image";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedProduct {
    pub rows: Vec<ProductRow>,
    pub image: String,
}

/// Maps a product onto its display rows, in a fixed order:
/// ID, Title, Price, Category, Rating, Rating Count.
pub fn render(product: &Product) -> RenderedProduct {
    let rows = vec![
        row("ID", product.id.to_string()),
        row("Title", product.title.clone()),
        row("Price", format!("{}{}", CURRENCY_SYMBOL, decimal_text(product.price))),
        row("Category", product.category.clone()),
        row("Rating", decimal_text(product.rating.rate)),
        row("Rating Count", product.rating.count.to_string()),
    ];

    RenderedProduct {
        rows,
        image: product.image.clone(),
    }
}

/// Two-column text table, labels padded to the widest one, image last.
pub fn to_table(rendered: &RenderedProduct) -> String {
    let width = rendered
        .rows
        .iter()
        .map(|r| r.label.len())
        .chain(std::iter::once(IMAGE_LABEL.len()))
        .max()
        .unwrap_or(0);

    let mut table = String::new();
    for r in &rendered.rows {
        table.push_str(&format!("{:<width$}  {}\n", r.label, r.value, width = width));
    }
    table.push_str(&format!("{:<width$}  {}\n", IMAGE_LABEL, rendered.image, width = width));

    table
}

fn row(label: &'static str, value: String) -> ProductRow {
    ProductRow { label, value }
}

// Whole numbers keep a trailing ".0" so 10 renders as "10.0", not "10".
fn decimal_text(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
