//! Document renderer.
//!
//! A configurator page body is a pure function of its definition: the
//! markup for every step, the definition itself as a JSON data block tagged
//! with [`RENDERER_VERSION`], and the storefront runtime script that reads
//! that block. [`extract_definition`] recovers the definition from a stored
//! body, so the page store is the only persistence needed.

use askama::Template;
use stepcart_core::{
    ConfiguratorDefinition, DiscountMetric, DiscountRule, Step, format_money,
};
use thiserror::Error;

/// Version of the document layout written by [`render_document`].
pub const RENDERER_VERSION: u32 = 1;

/// `id` of the script element carrying the definition JSON.
pub const DEFINITION_ELEMENT_ID: &str = "configurator-definition";

const RUNTIME_SCRIPT: &str = include_str!("../assets/configurator_runtime.js");

/// Errors from rendering or reading a configurator document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template failed to render.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// The definition could not be serialized or parsed.
    #[error("definition JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body has no definition block.
    #[error("document does not contain a configurator definition")]
    MissingDefinition,

    /// The body was written by a newer renderer.
    #[error("document version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
        /// Newest version this build reads.
        supported: u32,
    },
}

#[derive(Template)]
#[template(path = "configurator.html")]
struct ConfiguratorDocument<'a> {
    title: &'a str,
    first_step_title: &'a str,
    steps: Vec<StepView<'a>>,
    discounts: Vec<String>,
    element_id: &'static str,
    renderer_version: u32,
    definition_json: String,
    runtime_script: &'static str,
}

struct StepView<'a> {
    kind: &'static str,
    is_form: bool,
    products: Vec<ProductView<'a>>,
    fields: Vec<FieldView<'a>>,
}

struct ProductView<'a> {
    id: &'a str,
    title: &'a str,
    image_url: &'a str,
    price: String,
    compare_at_price: String,
    sold_out: bool,
}

struct FieldView<'a> {
    label: &'a str,
    name: &'a str,
    placeholder: &'a str,
    is_textarea: bool,
}

impl<'a> StepView<'a> {
    fn new(step: &'a Step) -> Self {
        let products = step
            .items()
            .iter()
            .map(|product| ProductView {
                id: product.id.as_str(),
                title: &product.title,
                image_url: &product.image_url,
                price: format_money(product.price()),
                compare_at_price: product
                    .variants
                    .first()
                    .and_then(|v| v.compare_at_price)
                    .map(format_money)
                    .unwrap_or_default(),
                sold_out: product.is_sold_out(),
            })
            .collect();

        let fields = step
            .fields()
            .iter()
            .map(|field| FieldView {
                label: &field.label,
                name: &field.name,
                placeholder: &field.placeholder,
                is_textarea: field.kind == stepcart_core::FieldKind::Textarea,
            })
            .collect();

        Self {
            kind: match step {
                Step::Products(_) => "products",
                Step::Form(_) => "form",
            },
            is_form: matches!(step, Step::Form(_)),
            products,
            fields,
        }
    }
}

/// One line of the discount tier listing, e.g. `Minimum Quantity: 3 - Discount: 15%`.
fn discount_line(metric: DiscountMetric, rule: &DiscountRule) -> String {
    let label = match metric {
        DiscountMetric::Quantity => "Quantity",
        DiscountMetric::Amount => "Amount",
    };
    format!(
        "Minimum {label}: {} - Discount: {}%",
        rule.minimum_threshold.normalize(),
        rule.discount_percent.normalize()
    )
}

/// Serialize the definition so it can sit inside a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\uXXXX` form
/// decodes to the same text, so the block can never close the element early.
fn embeddable_json(definition: &ConfiguratorDefinition) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(definition)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Render the page body for a definition.
///
/// # Errors
///
/// Returns `RenderError` if the definition cannot be serialized or the
/// template fails.
pub fn render_document(definition: &ConfiguratorDefinition) -> Result<String, RenderError> {
    let mut rules: Vec<&DiscountRule> = definition.discount.rules.iter().collect();
    rules.sort_by(|a, b| a.minimum_threshold.cmp(&b.minimum_threshold));

    let document = ConfiguratorDocument {
        title: &definition.title,
        first_step_title: definition.step(0).map_or("", Step::title),
        steps: definition.steps.iter().map(StepView::new).collect(),
        discounts: rules
            .into_iter()
            .map(|rule| discount_line(definition.discount.metric, rule))
            .collect(),
        element_id: DEFINITION_ELEMENT_ID,
        renderer_version: RENDERER_VERSION,
        definition_json: embeddable_json(definition)?,
        runtime_script: RUNTIME_SCRIPT,
    };

    Ok(document.render()?)
}

/// Recover the definition from a rendered page body.
///
/// # Errors
///
/// Returns `MissingDefinition` when the body has no definition block,
/// `UnsupportedVersion` when it was written by a newer renderer, and `Json`
/// when the block is not a valid definition.
pub fn extract_definition(body: &str) -> Result<ConfiguratorDefinition, RenderError> {
    let marker = format!("id=\"{DEFINITION_ELEMENT_ID}\"");
    let start = body.find(&marker).ok_or(RenderError::MissingDefinition)?;
    let tag_rest = body.get(start..).ok_or(RenderError::MissingDefinition)?;
    let tag_end = tag_rest.find('>').ok_or(RenderError::MissingDefinition)?;
    let (tag, after_tag) = tag_rest.split_at(tag_end);

    let version = tag
        .split_once("data-renderer-version=\"")
        .and_then(|(_, rest)| rest.split_once('"'))
        .and_then(|(value, _)| value.parse::<u32>().ok())
        .unwrap_or(RENDERER_VERSION);
    if version > RENDERER_VERSION {
        return Err(RenderError::UnsupportedVersion {
            found: version,
            supported: RENDERER_VERSION,
        });
    }

    let content = after_tag.get(1..).ok_or(RenderError::MissingDefinition)?;
    let end = content
        .find("</script>")
        .ok_or(RenderError::MissingDefinition)?;
    let json = content.get(..end).ok_or(RenderError::MissingDefinition)?;

    Ok(serde_json::from_str(json.trim())?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use stepcart_core::{
        DiscountPolicy, FieldKind, FormField, FormStep, ProductId, ProductRef, ProductStep,
        Variant, VariantId,
    };

    use super::*;

    fn definition() -> ConfiguratorDefinition {
        ConfiguratorDefinition {
            title: "Tea & Treats".to_string(),
            steps: vec![
                Step::Products(ProductStep {
                    title: "Step 1: Choose Products".to_string(),
                    items: vec![ProductRef {
                        id: ProductId::from_numeric(1),
                        title: "Green </script><b>Tea</b>".to_string(),
                        description: String::new(),
                        image_url: "https://cdn.example/tea.png".to_string(),
                        variants: vec![Variant {
                            id: VariantId::from_numeric(11),
                            price: Decimal::new(450, 2),
                            compare_at_price: Some(Decimal::new(6, 0)),
                            sku: None,
                            inventory_quantity: Some(3),
                        }],
                    }],
                }),
                Step::Form(FormStep {
                    title: "Step 2: Card".to_string(),
                    fields: vec![FormField {
                        label: "Message".to_string(),
                        name: "message".to_string(),
                        placeholder: "Enter text".to_string(),
                        kind: FieldKind::Textarea,
                    }],
                }),
            ],
            discount: DiscountPolicy::default(),
        }
    }

    #[test]
    fn test_render_then_extract() {
        let def = definition();
        let body = render_document(&def).unwrap();
        assert_eq!(extract_definition(&body).unwrap(), def);
    }

    #[test]
    fn test_render_is_deterministic() {
        let def = definition();
        assert_eq!(render_document(&def).unwrap(), render_document(&def).unwrap());
    }

    #[test]
    fn test_definition_block_cannot_close_script() {
        let body = render_document(&definition()).unwrap();
        let block_start = body.find(DEFINITION_ELEMENT_ID).unwrap();
        let block = &body[block_start..];
        let block = &block[..block.find("</script>").unwrap()];
        assert!(!block.contains("<b>"));
        assert!(block.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_markup_escapes_titles() {
        let body = render_document(&definition()).unwrap();
        assert!(body.contains("Tea &amp; Treats") || body.contains("Tea &#38; Treats"));
        assert!(body.contains("data-renderer-version=\"1\""));
        assert!(body.contains("<textarea name=\"message\""));
        assert!(body.contains("$ 4.50"));
        assert!(body.contains("Minimum Quantity: 3 - Discount: 15%"));
    }

    #[test]
    fn test_extract_without_block() {
        assert!(matches!(
            extract_definition("<p>hand written page</p>"),
            Err(RenderError::MissingDefinition)
        ));
    }

    #[test]
    fn test_extract_newer_version() {
        let body = format!(
            r#"<script type="application/json" id="{DEFINITION_ELEMENT_ID}" data-renderer-version="9">{{}}</script>"#
        );
        assert!(matches!(
            extract_definition(&body),
            Err(RenderError::UnsupportedVersion { found: 9, .. })
        ));
    }

    #[test]
    fn test_runtime_script_embedded() {
        let body = render_document(&definition()).unwrap();
        assert!(body.contains("cart/add.js"));
    }
}
