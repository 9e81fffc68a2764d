//! Wire types for the AJAX Cart API.
//!
//! These mirror the JSON the shop sends back; [`stepcart_core`] types are
//! what the rest of the crate works with.

use serde::Deserialize;
use stepcart_core::{CartAddition, CartApiError, CartLine};

/// A line in a successful `cart/add.js` answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AddedItem {
    /// Numeric variant id.
    pub variant_id: u64,
    pub quantity: u32,
    /// Product title plus variant title.
    #[serde(default)]
    pub title: String,
}

/// Successful `cart/add.js` answer for a multi-item request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddResponse {
    #[serde(default)]
    pub items: Vec<AddedItem>,
}

impl From<AddResponse> for CartAddition {
    fn from(response: AddResponse) -> Self {
        Self {
            items: response
                .items
                .into_iter()
                .map(|item| CartLine {
                    variant_id: item.variant_id,
                    quantity: item.quantity,
                    title: item.title,
                })
                .collect(),
        }
    }
}

/// Error body returned with a 4xx/5xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartErrorBody {
    /// Status repeated in the body; numeric or a string such as `"bad_request"`.
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    /// Short title (e.g., `"Cart Error"`).
    #[serde(default)]
    pub message: String,
    /// Explanation suitable for the shopper.
    #[serde(default)]
    pub description: String,
}

impl CartErrorBody {
    /// Convert into a `Rejected` error, using `http_status` when the body
    /// does not carry a numeric status.
    #[must_use]
    pub fn into_error(self, http_status: u16) -> CartApiError {
        let status = self
            .status
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(http_status);
        let description = if self.description.is_empty() {
            self.message.clone()
        } else {
            self.description
        };
        CartApiError::Rejected {
            status,
            message: self.message,
            description,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_with_numeric_status() {
        let body: CartErrorBody = serde_json::from_str(
            r#"{"status":422,"message":"Cart Error","description":"You can only add 2 Mug to the cart."}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_error(400),
            CartApiError::Rejected {
                status: 422,
                message: "Cart Error".to_string(),
                description: "You can only add 2 Mug to the cart.".to_string(),
            }
        );
    }

    #[test]
    fn test_error_body_with_string_status() {
        let body: CartErrorBody = serde_json::from_str(
            r#"{"status":"bad_request","message":"Parameter Missing or Invalid"}"#,
        )
        .unwrap();
        match body.into_error(400) {
            CartApiError::Rejected {
                status,
                description,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Parameter Missing or Invalid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_add_response_into_addition() {
        let response: AddResponse = serde_json::from_str(
            r#"{"items":[{"id":1,"variant_id":4401,"quantity":2,"title":"Mug - Blue","price":1200}]}"#,
        )
        .unwrap();
        let addition = CartAddition::from(response);
        assert_eq!(addition.items.len(), 1);
        assert_eq!(addition.items[0].variant_id, 4401);
        assert_eq!(addition.items[0].quantity, 2);
    }
}
