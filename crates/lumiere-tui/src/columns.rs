//! Table columns per resource

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use lumiere_api::catalog::{
    Batch, Brand, Category, Formulation, Ingredient, Packaging, Product, SkinType, Tag,
};
use lumiere_api::commerce::{Order, Voucher};
use lumiere_api::content::{BlogPost, Question};
use lumiere_api::{EntityId, Resource};

/// How an entity is laid out in a table row
pub trait Columns: Resource {
    const HEADERS: &'static [&'static str];
    /// Percentages, one per header
    const WIDTHS: &'static [u16];

    fn cells(&self) -> Vec<String>;
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// `1.250.000 ₫`
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out.push_str(" ₫");
    out
}

fn opt_id(id: Option<&EntityId>) -> String {
    id.map_or_else(|| "--".to_string(), ToString::to_string)
}

fn flag(value: bool) -> String {
    if value { "yes" } else { "" }.to_string()
}

macro_rules! named_columns {
    ($($ty:ty),*) => {$(
        impl Columns for $ty {
            const HEADERS: &'static [&'static str] = &["ID", "Name", "Description"];
            const WIDTHS: &'static [u16] = &[10, 30, 60];

            fn cells(&self) -> Vec<String> {
                vec![
                    self.id.to_string(),
                    self.name.clone(),
                    truncate(&self.description, 60),
                ]
            }
        }
    )*};
}

named_columns!(Category, Packaging, Formulation, SkinType, Tag);

macro_rules! origin_columns {
    ($($ty:ty),*) => {$(
        impl Columns for $ty {
            const HEADERS: &'static [&'static str] = &["ID", "Name", "Origin", "Description"];
            const WIDTHS: &'static [u16] = &[10, 25, 15, 50];

            fn cells(&self) -> Vec<String> {
                vec![
                    self.id.to_string(),
                    self.name.clone(),
                    self.origin.clone().unwrap_or_default(),
                    truncate(&self.description, 50),
                ]
            }
        }
    )*};
}

origin_columns!(Brand, Ingredient);

impl Columns for Product {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Price", "Stock", "Brand", "Category"];
    const WIDTHS: &'static [u16] = &[10, 35, 15, 10, 15, 15];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.name, 40),
            format_vnd(self.price),
            self.stock.to_string(),
            opt_id(self.brand_id.as_ref()),
            opt_id(self.category_id.as_ref()),
        ]
    }
}

impl Columns for Batch {
    const HEADERS: &'static [&'static str] = &["ID", "Code", "Product", "Qty", "Manufactured", "Expires"];
    const WIDTHS: &'static [u16] = &[10, 20, 15, 10, 20, 25];

    fn cells(&self) -> Vec<String> {
        let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        vec![
            self.id.to_string(),
            self.code.clone(),
            self.product_id.to_string(),
            self.quantity.to_string(),
            date(self.manufactured_on),
            date(self.expires_on),
        ]
    }
}

impl Columns for Voucher {
    const HEADERS: &'static [&'static str] = &["ID", "Code", "Discount", "Points", "Qty", "Status"];
    const WIDTHS: &'static [u16] = &[10, 20, 20, 15, 10, 25];

    fn cells(&self) -> Vec<String> {
        let discount = match self.max_discount {
            Some(cap) => format!("{}% (max {})", self.discount_percent, format_vnd(cap)),
            None => format!("{}%", self.discount_percent),
        };
        vec![
            self.id.to_string(),
            self.code.clone(),
            discount,
            self.points_required.to_string(),
            self.quantity.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

impl Columns for Order {
    const HEADERS: &'static [&'static str] = &["ID", "Customer", "Phone", "Total", "Status", "Placed"];
    const WIDTHS: &'static [u16] = &[10, 25, 15, 15, 15, 20];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.customer_name, 30),
            self.phone.clone(),
            format_vnd(self.total),
            self.status.to_string(),
            self.created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]
    }
}

impl Columns for BlogPost {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Author", "Tags", "Published"];
    const WIDTHS: &'static [u16] = &[10, 40, 15, 25, 10];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.title, 50),
            self.author.clone().unwrap_or_default(),
            truncate(&self.tags.join(", "), 30),
            flag(self.published),
        ]
    }
}

impl Columns for Question {
    const HEADERS: &'static [&'static str] = &["ID", "Question", "Answers"];
    const WIDTHS: &'static [u16] = &[10, 75, 15];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.content, 80),
            self.answers.len().to_string(),
        ]
    }
}
