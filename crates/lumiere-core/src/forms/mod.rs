//! Form schemas and client-side validation
//!
//! Each editable resource describes its modal form as a static list of
//! [`FieldSpec`]s. Field values are kept as raw text while the user types;
//! [`validate`] parses them into the JSON payload sent to the backend and
//! checks it against the resource's [`payloads`] form, rejecting the form
//! before any request is made.

pub mod payloads;

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use payloads::{
    BatchForm, BlogPostForm, NamedForm, OrderForm, OriginForm, ProductForm, QuestionForm,
    VoucherForm,
};

use lumiere_api::catalog::{
    Batch, Brand, Category, Formulation, Ingredient, Packaging, Product, SkinType, Tag,
};
use lumiere_api::commerce::{Order, OrderStatus, Voucher, VoucherStatus};
use lumiere_api::content::{Answer, BlogPost, Question};
use lumiere_api::{EntityId, Resource};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a field's text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// yes/no, true/false, 1/0
    Bool,
    /// `YYYY-MM-DD`
    Date,
    /// Reference to another entity
    Id,
    /// Comma separated references
    IdList,
    /// Comma separated strings
    TextList,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
    /// `content|skinTypeId|score` entries separated by `;`
    Answers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Payload key, camelCase as on the wire
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Shown as a marker; enforced by the payload form
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value of a freshly opened create form
    fn default_value(&self) -> String {
        match self.kind {
            FieldKind::Bool => "no".to_string(),
            FieldKind::Choice(options) => options.first().copied().unwrap_or_default().to_string(),
            _ => String::new(),
        }
    }
}

/// A field rejected by client-side validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(spec: &FieldSpec, message: impl std::fmt::Display) -> Self {
        Self {
            field: spec.name,
            message: format!("{} {message}", spec.label),
        }
    }
}

/// Raw field values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<&'static str, String>);

impl FormFields {
    /// Defaults for every field of `specs`
    pub fn blank(specs: &[FieldSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|spec| (spec.name, spec.default_value()))
                .collect(),
        )
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.insert(name, value.into());
    }

    pub fn get_mut(&mut self, name: &'static str) -> &mut String {
        self.0.entry(name).or_default()
    }
}

/// Parse `fields` into `R`'s request payload and check it
///
/// # Errors
/// Returns the first field, in form order, that cannot be parsed or breaks
/// one of the payload form's rules.
pub fn validate<R: Editable>(fields: &FormFields) -> Result<Value, ValidationError> {
    let payload = parse_fields(R::FIELDS, fields)?;
    let form: R::Form = serde_json::from_value(payload.clone()).map_err(|e| ValidationError {
        field: "",
        message: format!("Invalid form: {e}"),
    })?;
    form.validate()
        .map_err(|errors| first_error(R::FIELDS, &errors))?;
    Ok(payload)
}

fn parse_fields(specs: &[FieldSpec], fields: &FormFields) -> Result<Value, ValidationError> {
    let mut payload = Map::new();
    for spec in specs {
        let raw = fields.get(spec.name).trim();
        let value = if raw.is_empty() {
            empty_value(spec.kind)
        } else {
            parse_value(spec, raw)?
        };
        payload.insert(spec.name.to_string(), value);
    }
    Ok(Value::Object(payload))
}

fn empty_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text => Value::String(String::new()),
        FieldKind::IdList | FieldKind::TextList | FieldKind::Answers => Value::Array(Vec::new()),
        _ => Value::Null,
    }
}

fn parse_value(spec: &FieldSpec, raw: &str) -> Result<Value, ValidationError> {
    Ok(match spec.kind {
        FieldKind::Text => Value::String(raw.to_string()),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| ValidationError::new(spec, "must be a whole number"))?,
        FieldKind::Bool => match raw.to_lowercase().as_str() {
            "yes" | "true" | "1" | "y" => Value::Bool(true),
            "no" | "false" | "0" | "n" => Value::Bool(false),
            _ => return Err(ValidationError::new(spec, "must be yes or no")),
        },
        FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(|d| Value::String(d.format(DATE_FORMAT).to_string()))
            .map_err(|_| ValidationError::new(spec, "must be a date (YYYY-MM-DD)"))?,
        FieldKind::Id => id_value(raw),
        FieldKind::IdList => Value::Array(split_list(raw, ',').map(id_value).collect()),
        FieldKind::TextList => Value::Array(
            split_list(raw, ',')
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        FieldKind::Choice(options) => options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(raw))
            .map(|option| Value::String((*option).to_string()))
            .ok_or_else(|| {
                ValidationError::new(spec, format!("must be one of {}", options.join(", ")))
            })?,
        FieldKind::Answers => Value::Array(
            split_list(raw, ';')
                .map(|entry| parse_answer(spec, entry))
                .collect::<Result<_, _>>()?,
        ),
    })
}

/// The failure of the earliest field in `specs`
fn first_error(specs: &[FieldSpec], errors: &ValidationErrors) -> ValidationError {
    let field_errors = errors.field_errors();
    specs
        .iter()
        .find_map(|spec| {
            let (_, failures) = field_errors
                .iter()
                .find(|(key, _)| same_field(key, spec.name))?;
            let failure = failures.first()?;
            let message = failure.message.as_deref().unwrap_or(&failure.code);
            Some(ValidationError::new(spec, message))
        })
        .unwrap_or_else(|| ValidationError {
            field: "",
            message: errors.to_string(),
        })
}

/// `brand_id` and `brandId` name the same field
fn same_field(key: &str, name: &str) -> bool {
    key.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .eq(name.chars().map(|c| c.to_ascii_lowercase()))
}

fn split_list(raw: &str, separator: char) -> impl Iterator<Item = &str> {
    raw.split(separator).map(str::trim).filter(|s| !s.is_empty())
}

fn id_value(raw: &str) -> Value {
    match EntityId::from_str(raw) {
        Ok(EntityId::Number(n)) => Value::from(n),
        Ok(EntityId::Text(s)) => Value::String(s),
        Err(never) => match never {},
    }
}

fn parse_answer(spec: &FieldSpec, entry: &str) -> Result<Value, ValidationError> {
    let mut parts = entry.split('|').map(str::trim);
    let content = parts.next().filter(|c| !c.is_empty());
    let skin_type = parts.next().filter(|s| !s.is_empty());
    let (Some(content), Some(skin_type)) = (content, skin_type) else {
        return Err(ValidationError::new(
            spec,
            "entries must look like `answer|skinTypeId|score`",
        ));
    };
    let score = match parts.next() {
        None | Some("") => 1,
        Some(score) => score
            .parse::<u32>()
            .map_err(|_| ValidationError::new(spec, "scores must be whole numbers"))?,
    };
    Ok(json!({
        "content": content,
        "skinTypeId": id_value(skin_type),
        "score": score,
    }))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn format_id(id: Option<&EntityId>) -> String {
    id.map(ToString::to_string).unwrap_or_default()
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

/// A resource that can be created and edited through a modal form
pub trait Editable: Resource {
    const FIELDS: &'static [FieldSpec];

    /// Payload shape whose rules gate every submit
    type Form: DeserializeOwned + Validate;

    /// Current values, used to pre-populate the edit form
    fn form_values(&self) -> FormFields;
}

const NAME_DESCRIPTION: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::Text),
];

const NAME_DESCRIPTION_ORIGIN: &[FieldSpec] = &[
    NAME_DESCRIPTION[0],
    NAME_DESCRIPTION[1],
    FieldSpec::new("origin", "Origin", FieldKind::Text),
];

macro_rules! name_description_form {
    ($ty:ty) => {
        impl Editable for $ty {
            const FIELDS: &'static [FieldSpec] = NAME_DESCRIPTION;
            type Form = NamedForm;

            fn form_values(&self) -> FormFields {
                FormFields::from_pairs([
                    ("name", self.name.clone()),
                    ("description", self.description.clone()),
                ])
            }
        }
    };
    ($ty:ty, origin) => {
        impl Editable for $ty {
            const FIELDS: &'static [FieldSpec] = NAME_DESCRIPTION_ORIGIN;
            type Form = OriginForm;

            fn form_values(&self) -> FormFields {
                FormFields::from_pairs([
                    ("name", self.name.clone()),
                    ("description", self.description.clone()),
                    ("origin", self.origin.clone().unwrap_or_default()),
                ])
            }
        }
    };
}

name_description_form!(Brand, origin);
name_description_form!(Ingredient, origin);
name_description_form!(Category);
name_description_form!(Packaging);
name_description_form!(Formulation);
name_description_form!(SkinType);
name_description_form!(Tag);

impl Editable for Product {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        NAME_DESCRIPTION[1],
        FieldSpec::new("price", "Price", FieldKind::Integer).required(),
        FieldSpec::new("stock", "Stock", FieldKind::Integer),
        FieldSpec::new("brandId", "Brand", FieldKind::Id).required(),
        FieldSpec::new("categoryId", "Category", FieldKind::Id).required(),
        FieldSpec::new("skinTypeIds", "Skin types", FieldKind::IdList),
    ];
    type Form = ProductForm;

    fn form_values(&self) -> FormFields {
        FormFields::from_pairs([
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("stock", self.stock.to_string()),
            ("brandId", format_id(self.brand_id.as_ref())),
            ("categoryId", format_id(self.category_id.as_ref())),
            (
                "skinTypeIds",
                self.skin_type_ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ])
    }
}

impl Editable for Batch {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("code", "Batch code", FieldKind::Text).required(),
        FieldSpec::new("productId", "Product", FieldKind::Id).required(),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer).required(),
        FieldSpec::new("manufacturedOn", "Manufactured on", FieldKind::Date),
        FieldSpec::new("expiresOn", "Expires on", FieldKind::Date).required(),
    ];
    type Form = BatchForm;

    fn form_values(&self) -> FormFields {
        FormFields::from_pairs([
            ("code", self.code.clone()),
            ("productId", self.product_id.to_string()),
            ("quantity", self.quantity.to_string()),
            ("manufacturedOn", format_date(self.manufactured_on)),
            ("expiresOn", format_date(self.expires_on)),
        ])
    }
}

const VOUCHER_STATUSES: &[&str] = &["Active", "Inactive", "Expired"];

impl Editable for Voucher {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("code", "Code", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::Text),
        FieldSpec::new("discountPercent", "Discount %", FieldKind::Integer).required(),
        FieldSpec::new("maxDiscount", "Max discount", FieldKind::Integer),
        FieldSpec::new("pointsRequired", "Points required", FieldKind::Integer).required(),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer).required(),
        FieldSpec::new("status", "Status", FieldKind::Choice(VOUCHER_STATUSES)).required(),
        FieldSpec::new("expiresOn", "Expires on", FieldKind::Date),
    ];
    type Form = VoucherForm;

    fn form_values(&self) -> FormFields {
        // An unrecognised status stays blank so saving forces an explicit choice
        let status = match self.status {
            VoucherStatus::Unknown => "",
            known => known.as_str(),
        };
        FormFields::from_pairs([
            ("code", self.code.clone()),
            ("description", self.description.clone()),
            ("discountPercent", self.discount_percent.to_string()),
            (
                "maxDiscount",
                self.max_discount.map(|m| m.to_string()).unwrap_or_default(),
            ),
            ("pointsRequired", self.points_required.to_string()),
            ("quantity", self.quantity.to_string()),
            ("status", status.to_string()),
            ("expiresOn", format_date(self.expires_on)),
        ])
    }
}

impl Editable for BlogPost {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("content", "Content", FieldKind::Text).required(),
        FieldSpec::new("author", "Author", FieldKind::Text),
        FieldSpec::new("tags", "Tags", FieldKind::TextList),
        FieldSpec::new("published", "Published", FieldKind::Bool),
    ];
    type Form = BlogPostForm;

    fn form_values(&self) -> FormFields {
        FormFields::from_pairs([
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("author", self.author.clone().unwrap_or_default()),
            ("tags", self.tags.join(", ")),
            ("published", yes_no(self.published)),
        ])
    }
}

const ORDER_STATUSES: &[&str] = &["Pending", "Confirmed", "Shipping", "Delivered", "Cancelled"];

impl Editable for Order {
    const FIELDS: &'static [FieldSpec] =
        &[FieldSpec::new("status", "Status", FieldKind::Choice(ORDER_STATUSES)).required()];
    type Form = OrderForm;

    fn form_values(&self) -> FormFields {
        let status = match self.status {
            OrderStatus::Unknown => "",
            known => known.as_str(),
        };
        FormFields::from_pairs([("status", status.to_string())])
    }
}

impl Editable for Question {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("content", "Question", FieldKind::Text).required(),
        FieldSpec::new("answers", "Answers", FieldKind::Answers).required(),
    ];
    type Form = QuestionForm;

    fn form_values(&self) -> FormFields {
        let answers = self
            .answers
            .iter()
            .map(|Answer { content, skin_type_id, score }| {
                format!("{content}|{skin_type_id}|{score}")
            })
            .collect::<Vec<_>>()
            .join("; ");
        FormFields::from_pairs([("content", self.content.clone()), ("answers", answers)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_rejected() {
        let mut fields = FormFields::blank(Brand::FIELDS);
        fields.set("description", "desc");
        let err = validate::<Brand>(&fields).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut fields = FormFields::blank(Tag::FIELDS);
        fields.set("name", "   ");
        assert!(validate::<Tag>(&fields).is_err());
    }

    #[test]
    fn test_brand_payload() {
        let mut fields = FormFields::blank(Brand::FIELDS);
        fields.set("name", " Acme ");
        fields.set("description", "desc");
        let payload = validate::<Brand>(&fields).unwrap();
        assert_eq!(
            payload,
            json!({"name": "Acme", "description": "desc", "origin": ""})
        );
    }

    #[test]
    fn test_price_must_be_positive() {
        let mut fields = FormFields::blank(Product::FIELDS);
        fields.set("name", "Toner");
        fields.set("price", "0");
        fields.set("brandId", "1");
        fields.set("categoryId", "2");
        let err = validate::<Product>(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Price must be greater than 0");

        fields.set("price", "abc");
        let err = validate::<Product>(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Price must be a whole number");

        fields.set("price", "250000");
        fields.set("skinTypeIds", "1, 3,, x-9");
        let payload = validate::<Product>(&fields).unwrap();
        assert_eq!(payload["price"], 250_000);
        assert_eq!(payload["skinTypeIds"], json!([1, 3, "x-9"]));
        assert_eq!(payload["stock"], Value::Null);
    }

    #[test]
    fn test_voucher_percent_range_and_choice() {
        let mut fields = FormFields::blank(Voucher::FIELDS);
        assert_eq!(fields.get("status"), "Active");
        fields.set("code", "GLOW10");
        fields.set("discountPercent", "120");
        fields.set("pointsRequired", "200");
        fields.set("quantity", "5");
        let err = validate::<Voucher>(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Discount % must be between 1 and 100");

        fields.set("discountPercent", "10");
        fields.set("status", "inactive");
        fields.set("expiresOn", "2026-13-01");
        let err = validate::<Voucher>(&fields).unwrap_err();
        assert_eq!(err.field, "expiresOn");

        fields.set("expiresOn", "2026-12-31");
        let payload = validate::<Voucher>(&fields).unwrap();
        assert_eq!(payload["status"], "Inactive");
        assert_eq!(payload["expiresOn"], "2026-12-31");
    }

    #[test]
    fn test_question_answers() {
        let mut fields = FormFields::blank(Question::FIELDS);
        fields.set("content", "How does your skin feel at noon?");
        fields.set("answers", "Shiny|1|2; Tight|2");
        let payload = validate::<Question>(&fields).unwrap();
        assert_eq!(
            payload["answers"],
            json!([
                {"content": "Shiny", "skinTypeId": 1, "score": 2},
                {"content": "Tight", "skinTypeId": 2, "score": 1}
            ])
        );

        fields.set("answers", "Shiny");
        assert!(validate::<Question>(&fields).is_err());
    }

    #[test]
    fn test_edit_values_round_trip_through_validation() {
        let post = BlogPost {
            id: EntityId::Number(4),
            title: "Double cleansing".into(),
            content: "Oil first.".into(),
            author: None,
            tags: vec!["routine".into(), "basics".into()],
            image_url: None,
            published: true,
        };
        let payload = validate::<BlogPost>(&post.form_values()).unwrap();
        assert_eq!(payload["tags"], json!(["routine", "basics"]));
        assert_eq!(payload["published"], true);
    }
    fn voucher(status: VoucherStatus) -> Voucher {
        Voucher {
            id: EntityId::Number(7),
            code: "GLOW10".into(),
            description: String::new(),
            discount_percent: 10,
            max_discount: None,
            points_required: 200,
            quantity: 5,
            status,
            expires_on: None,
            is_deleted: false,
        }
    }

    #[test]
    fn test_expired_voucher_keeps_its_status() {
        let expired = voucher(VoucherStatus::Expired);
        let payload = validate::<Voucher>(&expired.form_values()).unwrap();
        assert_eq!(payload["status"], "Expired");
    }

    #[test]
    fn test_unrecognised_status_must_be_chosen() {
        let err = validate::<Voucher>(&voucher(VoucherStatus::Unknown).form_values()).unwrap_err();
        assert_eq!(err.field, "status");
        assert_eq!(err.to_string(), "Status is required");

        let order = Order {
            id: EntityId::Number(9),
            customer_name: "Lan".into(),
            phone: String::new(),
            status: OrderStatus::Unknown,
            total: 120_000,
            created_at: None,
        };
        let err = validate::<Order>(&order.form_values()).unwrap_err();
        assert_eq!(err.field, "status");
    }

    #[test]
    fn test_order_choices_cover_every_status() {
        let known: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(known, ORDER_STATUSES);
    }

    #[test]
    fn test_rule_errors_follow_form_order() {
        let fields = FormFields::blank(Batch::FIELDS);
        let err = validate::<Batch>(&fields).unwrap_err();
        assert_eq!(err.field, "code");

        let mut fields = fields;
        fields.set("code", "B-01");
        fields.set("productId", "3");
        fields.set("quantity", "-2");
        let err = validate::<Batch>(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be greater than 0");
    }

    #[test]
    fn test_max_length_counts_characters() {
        let mut fields = FormFields::blank(Tag::FIELDS);
        fields.set("name", "é".repeat(100));
        assert!(validate::<Tag>(&fields).is_ok());
        fields.set("name", "é".repeat(101));
        let err = validate::<Tag>(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Name must be at most 100 characters");
    }

    #[test]
    fn test_same_field() {
        assert!(same_field("brand_id", "brandId"));
        assert!(same_field("name", "name"));
        assert!(!same_field("brand_id", "categoryId"));
    }
}
