use std::borrow::Cow;

use crate::{Ack, CartData, Dish, Profile};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// GET 请求不携带 body
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or prefix, for requests that append a segment).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Concrete path for this request instance.
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(Self::PATH)
    }
}

// =========================================================
// Account
// =========================================================

/// Response of login/register. No token means cookie-session auth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/account/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/account/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = Option<Profile>;
    const PATH: &'static str = "/api/account/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Email is immutable and never part of the update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub last_name: String,
    pub address: String,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/account/profile/update";
    const METHOD: HttpMethod = HttpMethod::Put;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangePasswordRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/account/profile/changePassword";
    const METHOD: HttpMethod = HttpMethod::Put;
}

// =========================================================
// Catalog
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishListResponse {
    #[serde(default)]
    pub data: Option<Vec<Dish>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishResponse {
    #[serde(default)]
    pub dish: Option<Dish>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListDishesRequest;

impl ApiRequest for ListDishesRequest {
    type Response = DishListResponse;
    const PATH: &'static str = "/Customer/Home/GetAll";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetDishRequest {
    pub id: i64,
}

impl ApiRequest for GetDishRequest {
    type Response = DishResponse;
    const PATH: &'static str = "/Customer/Home/Get";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}/{}", Self::PATH, self.id))
    }
}

// =========================================================
// Cart
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct GetCartRequest;

impl ApiRequest for GetCartRequest {
    type Response = CartData;
    const PATH: &'static str = "/Customer/Cart/GetCartData";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub dish_id: i64,
    pub dish_name: String,
    pub dish_price: f64,
    pub quantity: u32,
}

impl ApiRequest for AddToCartRequest {
    type Response = Ack;
    const PATH: &'static str = "/Customer/Cart/AddToCart";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub dish_id: i64,
    pub quantity: u32,
}

impl ApiRequest for UpdateCartRequest {
    type Response = Ack;
    const PATH: &'static str = "/Customer/Cart/UpdateCart";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// The body is the raw dish id, not an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoveFromCartRequest {
    pub dish_id: i64,
}

impl ApiRequest for RemoveFromCartRequest {
    type Response = Ack;
    const PATH: &'static str = "/Customer/Cart/RemoveFromCart";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Empty object body: the server commits its own copy of the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceOrderRequest {}

impl ApiRequest for PlaceOrderRequest {
    type Response = Ack;
    const PATH: &'static str = "/Customer/Cart/PlaceOrder";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_body_is_raw_id() {
        let body = serde_json::to_string(&RemoveFromCartRequest { dish_id: 7 }).unwrap();
        assert_eq!(body, "7");
    }

    #[test]
    fn test_place_order_body_is_empty_object() {
        let body = serde_json::to_string(&PlaceOrderRequest {}).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_dish_path_appends_id() {
        assert_eq!(GetDishRequest { id: 42 }.path(), "/Customer/Home/Get/42");
        assert_eq!(GetCartRequest.path(), GetCartRequest::PATH);
    }

    #[test]
    fn test_register_omits_absent_address() {
        let req = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "secret1".to_string(),
            name: "Ana".to_string(),
            last_name: "Diaz".to_string(),
            address: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["lastName"], "Diaz");
        assert!(value.get("address").is_none());
    }

    #[test]
    fn test_cart_data_tolerates_null_items() {
        let data: CartData = serde_json::from_str(r#"{"cartItems":null}"#).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.total_quantity(), 0);
    }

    #[test]
    fn test_dish_wire_names() {
        let dish: Dish = serde_json::from_str(
            r#"{"id":3,"name":"Paella","price":12.5,"description":"<b>rice</b>","imageURL":"/img/3.png"}"#,
        )
        .unwrap();
        assert_eq!(dish.image_url.as_deref(), Some("/img/3.png"));
        assert_eq!(dish.plain_description(), "rice");
        assert!(dish.matches("RICE"));
        assert!(!dish.matches("pasta"));
    }
}
