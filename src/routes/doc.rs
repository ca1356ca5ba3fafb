use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse},
        cart::{AddToCartRequest, CartLine, CartList, UpdateCartItemRequest},
        categories::{CategoryList, CategoryRequest},
        orders::{CheckoutRequest, OrderItemLine, OrderList, OrderWithItems, UpdateOrderStatusRequest},
        payments::{PaymentResult, SimulatePaymentRequest},
        products::{ProductList, ProductRequest, ProductWithCategory, ProductWithCategoryList},
    },
    models::{CartItem, Category, Order, OrderItem, OrderStatus, Product},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, categories, health, orders, payments, products},
    session::SESSION_COOKIE,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        auth::current_user,
        auth::update_profile,
        categories::list_categories,
        categories::get_category,
        products::list_products,
        products::featured_products,
        products::popular_products,
        products::get_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,
        orders::list_orders,
        orders::get_order,
        orders::checkout,
        payments::simulate_payment,
        admin::create_category,
        admin::update_category,
        admin::delete_category,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
    ),
    components(
        schemas(
            Category,
            Product,
            CartItem,
            Order,
            OrderItem,
            OrderStatus,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            CategoryRequest,
            CategoryList,
            ProductRequest,
            ProductList,
            ProductWithCategory,
            ProductWithCategoryList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartList,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderItemLine,
            OrderWithItems,
            OrderList,
            SimulatePaymentRequest,
            PaymentResult,
            health::HealthData,
            Meta,
            ApiResponse<UserResponse>,
            ApiResponse<Category>,
            ApiResponse<CategoryList>,
            ApiResponse<ProductWithCategory>,
            ApiResponse<ProductWithCategoryList>,
            ApiResponse<CartItem>,
            ApiResponse<CartList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<PaymentResult>,
            ApiResponse<serde_json::Value>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and session endpoints"),
        (name = "Categories", description = "Category catalog endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Payments", description = "Demo payment endpoint"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
