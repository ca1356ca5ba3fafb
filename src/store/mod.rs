use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    CartItem, Category, NewCartItem, NewCategory, NewOrder, NewOrderItem, NewProduct, NewUser,
    Order, OrderItem, OrderStatus, Product, ProductUpdate, ShippingDetails, User, UserPatch,
};

mod seed;

/// In-memory data store. Owned by the server process and injected through
/// `AppState`; swap-in point for a real database.
///
/// Every operation takes the single lock once, so each call is atomic with
/// respect to concurrent requests. Lookups return `None`/empty rather than
/// erroring; referential integrity is the caller's concern.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct IdSeq(i32);

impl IdSeq {
    fn next(&mut self) -> i32 {
        self.0 += 1;
        self.0
    }
}

#[derive(Default)]
struct StoreInner {
    users: HashMap<i32, User>,
    categories: HashMap<i32, Category>,
    products: HashMap<i32, Product>,
    cart_items: HashMap<i32, CartItem>,
    orders: HashMap<i32, Order>,
    order_items: HashMap<i32, OrderItem>,

    user_seq: IdSeq,
    category_seq: IdSeq,
    product_seq: IdSeq,
    cart_item_seq: IdSeq,
    order_seq: IdSeq,
    order_item_seq: IdSeq,
}

fn sorted_by_id<T: Clone>(map: &HashMap<i32, T>, id_of: impl Fn(&T) -> i32) -> Vec<T> {
    let mut rows: Vec<T> = map.values().cloned().collect();
    rows.sort_by_key(|row| id_of(row));
    rows
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- users ----

    pub async fn user(&self, id: i32) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    pub async fn create_user(&self, new: NewUser) -> User {
        let mut guard = self.inner.write().await;
        let id = guard.user_seq.next();
        let user = User {
            id,
            username: new.username,
            password_hash: new.password_hash,
            email: new.email,
            is_admin: new.is_admin,
            first_name: new.first_name,
            last_name: new.last_name,
            address: new.address,
            city: new.city,
            state: new.state,
            zip_code: new.zip_code,
            country: new.country,
            phone: new.phone,
        };
        guard.users.insert(id, user.clone());
        user
    }

    pub async fn update_user(&self, id: i32, patch: UserPatch) -> Option<User> {
        let mut guard = self.inner.write().await;
        let user = guard.users.get_mut(&id)?;
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(address) = patch.address {
            user.address = Some(address);
        }
        if let Some(city) = patch.city {
            user.city = Some(city);
        }
        if let Some(state) = patch.state {
            user.state = Some(state);
        }
        if let Some(zip_code) = patch.zip_code {
            user.zip_code = Some(zip_code);
        }
        if let Some(country) = patch.country {
            user.country = Some(country);
        }
        if let Some(phone) = patch.phone {
            user.phone = Some(phone);
        }
        Some(user.clone())
    }

    // ---- categories ----

    pub async fn categories(&self) -> Vec<Category> {
        sorted_by_id(&self.inner.read().await.categories, |c| c.id)
    }

    pub async fn category(&self, id: i32) -> Option<Category> {
        self.inner.read().await.categories.get(&id).cloned()
    }

    pub async fn create_category(&self, new: NewCategory) -> Category {
        let mut guard = self.inner.write().await;
        let id = guard.category_seq.next();
        let category = Category {
            id,
            name: new.name,
            description: new.description,
        };
        guard.categories.insert(id, category.clone());
        category
    }

    pub async fn update_category(&self, id: i32, new: NewCategory) -> Option<Category> {
        let mut guard = self.inner.write().await;
        let category = guard.categories.get_mut(&id)?;
        category.name = new.name;
        category.description = new.description;
        Some(category.clone())
    }

    pub async fn delete_category(&self, id: i32) -> bool {
        self.inner.write().await.categories.remove(&id).is_some()
    }

    // ---- products ----

    pub async fn products(&self) -> Vec<Product> {
        sorted_by_id(&self.inner.read().await.products, |p| p.id)
    }

    /// Products joined with their category name; products whose category no
    /// longer exists are omitted.
    pub async fn products_with_category(&self) -> Vec<(Product, String)> {
        let guard = self.inner.read().await;
        let mut rows: Vec<(Product, String)> = guard
            .products
            .values()
            .filter_map(|product| {
                guard
                    .categories
                    .get(&product.category_id)
                    .map(|category| (product.clone(), category.name.clone()))
            })
            .collect();
        rows.sort_by_key(|(product, _)| product.id);
        rows
    }

    pub async fn product(&self, id: i32) -> Option<Product> {
        self.inner.read().await.products.get(&id).cloned()
    }

    pub async fn product_with_category(&self, id: i32) -> Option<(Product, String)> {
        let guard = self.inner.read().await;
        let product = guard.products.get(&id)?;
        let category = guard.categories.get(&product.category_id)?;
        Some((product.clone(), category.name.clone()))
    }

    pub async fn products_by_category(&self, category_id: i32) -> Vec<Product> {
        let guard = self.inner.read().await;
        let mut rows: Vec<Product> = guard
            .products
            .values()
            .filter(|product| product.category_id == category_id)
            .cloned()
            .collect();
        rows.sort_by_key(|product| product.id);
        rows
    }

    pub async fn featured_products(&self, limit: Option<usize>) -> Vec<(Product, String)> {
        self.flagged_products(|product| product.is_featured, limit)
            .await
    }

    pub async fn popular_products(&self, limit: Option<usize>) -> Vec<(Product, String)> {
        self.flagged_products(|product| product.is_popular, limit)
            .await
    }

    async fn flagged_products(
        &self,
        flag: impl Fn(&Product) -> bool,
        limit: Option<usize>,
    ) -> Vec<(Product, String)> {
        let guard = self.inner.read().await;
        let mut rows: Vec<(Product, String)> = guard
            .products
            .values()
            .filter(|product| flag(product))
            .filter_map(|product| {
                guard
                    .categories
                    .get(&product.category_id)
                    .map(|category| (product.clone(), category.name.clone()))
            })
            .collect();
        rows.sort_by_key(|(product, _)| product.id);
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    pub async fn create_product(&self, new: NewProduct) -> Product {
        let mut guard = self.inner.write().await;
        let id = guard.product_seq.next();
        let product = Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            old_price: new.old_price,
            image_url: new.image_url,
            category_id: new.category_id,
            stock: new.stock,
            rating: new.rating,
            rating_count: new.rating_count,
            is_featured: new.is_featured,
            is_popular: new.is_popular,
            created_at: Utc::now(),
        };
        guard.products.insert(id, product.clone());
        product
    }

    pub async fn update_product(&self, id: i32, update: ProductUpdate) -> Option<Product> {
        let mut guard = self.inner.write().await;
        let product = guard.products.get_mut(&id)?;
        product.name = update.name;
        product.description = update.description;
        product.price = update.price;
        product.old_price = update.old_price;
        product.image_url = update.image_url;
        product.category_id = update.category_id;
        product.stock = update.stock;
        if let Some(rating) = update.rating {
            product.rating = rating;
        }
        if let Some(rating_count) = update.rating_count {
            product.rating_count = rating_count;
        }
        if let Some(is_featured) = update.is_featured {
            product.is_featured = is_featured;
        }
        if let Some(is_popular) = update.is_popular {
            product.is_popular = is_popular;
        }
        Some(product.clone())
    }

    pub async fn delete_product(&self, id: i32) -> bool {
        self.inner.write().await.products.remove(&id).is_some()
    }

    // ---- cart ----

    pub async fn cart_items(&self, user_id: i32) -> Vec<CartItem> {
        let guard = self.inner.read().await;
        let mut rows: Vec<CartItem> = guard
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|item| item.id);
        rows
    }

    /// Cart lines joined with their product; lines whose product was deleted
    /// are omitted.
    pub async fn cart_items_with_products(&self, user_id: i32) -> Vec<(CartItem, Product)> {
        let guard = self.inner.read().await;
        let mut rows: Vec<(CartItem, Product)> = guard
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .filter_map(|item| {
                guard
                    .products
                    .get(&item.product_id)
                    .map(|product| (item.clone(), product.clone()))
            })
            .collect();
        rows.sort_by_key(|(item, _)| item.id);
        rows
    }

    pub async fn cart_item(&self, id: i32) -> Option<CartItem> {
        self.inner.read().await.cart_items.get(&id).cloned()
    }

    pub async fn cart_item_by_user_and_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Option<CartItem> {
        self.inner
            .read()
            .await
            .cart_items
            .values()
            .find(|item| item.user_id == user_id && item.product_id == product_id)
            .cloned()
    }

    /// Adds to the cart, merging into an existing (user, product) row by
    /// summing quantities instead of creating a duplicate.
    pub async fn create_cart_item(&self, new: NewCartItem) -> CartItem {
        let mut guard = self.inner.write().await;
        if let Some(item) = guard
            .cart_items
            .values_mut()
            .find(|item| item.user_id == new.user_id && item.product_id == new.product_id)
        {
            item.quantity += new.quantity;
            return item.clone();
        }
        let id = guard.cart_item_seq.next();
        let item = CartItem {
            id,
            user_id: new.user_id,
            product_id: new.product_id,
            quantity: new.quantity,
        };
        guard.cart_items.insert(id, item.clone());
        item
    }

    pub async fn update_cart_item(&self, id: i32, quantity: i32) -> Option<CartItem> {
        let mut guard = self.inner.write().await;
        let item = guard.cart_items.get_mut(&id)?;
        item.quantity = quantity;
        Some(item.clone())
    }

    pub async fn delete_cart_item(&self, id: i32) -> bool {
        self.inner.write().await.cart_items.remove(&id).is_some()
    }

    pub async fn clear_cart(&self, user_id: i32) {
        self.inner
            .write()
            .await
            .cart_items
            .retain(|_, item| item.user_id != user_id);
    }

    // ---- orders ----

    pub async fn orders(&self) -> Vec<Order> {
        sorted_by_id(&self.inner.read().await.orders, |o| o.id)
    }

    pub async fn orders_by_user(&self, user_id: i32) -> Vec<Order> {
        let guard = self.inner.read().await;
        let mut rows: Vec<Order> = guard
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|order| order.id);
        rows
    }

    pub async fn order(&self, id: i32) -> Option<Order> {
        self.inner.read().await.orders.get(&id).cloned()
    }

    pub async fn order_with_items(&self, id: i32) -> Option<(Order, Vec<(OrderItem, Product)>)> {
        let guard = self.inner.read().await;
        let order = guard.orders.get(&id)?.clone();
        let mut items: Vec<(OrderItem, Product)> = guard
            .order_items
            .values()
            .filter(|item| item.order_id == id)
            .filter_map(|item| {
                guard
                    .products
                    .get(&item.product_id)
                    .map(|product| (item.clone(), product.clone()))
            })
            .collect();
        items.sort_by_key(|(item, _)| item.id);
        Some((order, items))
    }

    /// Persists the order and all of its items under one write guard; no
    /// partial order is ever observable.
    pub async fn create_order(&self, new: NewOrder, items: Vec<NewOrderItem>) -> Order {
        let mut guard = self.inner.write().await;
        guard.insert_order(new, items)
    }

    /// Checkout in a single store operation: snapshot the caller's cart
    /// joined with products, capture unit prices and the total from the
    /// products as they are right now, persist the order with its items and
    /// clear the cart. Returns `None` when the cart has no purchasable lines,
    /// in which case nothing is written.
    pub async fn checkout_cart(
        &self,
        user_id: i32,
        shipping: ShippingDetails,
    ) -> Option<(Order, Vec<(OrderItem, Product)>)> {
        let mut guard = self.inner.write().await;

        let mut lines: Vec<(CartItem, Product)> = guard
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .filter_map(|item| {
                guard
                    .products
                    .get(&item.product_id)
                    .map(|product| (item.clone(), product.clone()))
            })
            .collect();
        lines.sort_by_key(|(item, _)| item.id);
        if lines.is_empty() {
            return None;
        }

        let total = lines
            .iter()
            .map(|(item, product)| product.price * item.quantity as f64)
            .sum();
        let new_items = lines
            .iter()
            .map(|(item, product)| NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price: product.price,
            })
            .collect();

        let order = guard.insert_order(
            NewOrder {
                user_id,
                status: OrderStatus::Pending,
                shipping,
                total,
            },
            new_items,
        );

        guard.cart_items.retain(|_, item| item.user_id != user_id);

        let items = lines
            .into_iter()
            .zip(order_items_of(&guard, order.id))
            .map(|((_, product), item)| (item, product))
            .collect();
        Some((order, items))
    }

    pub async fn update_order_status(&self, id: i32, status: OrderStatus) -> Option<Order> {
        let mut guard = self.inner.write().await;
        let order = guard.orders.get_mut(&id)?;
        order.status = status;
        order.updated_at = Utc::now();
        Some(order.clone())
    }
}

fn order_items_of(inner: &StoreInner, order_id: i32) -> Vec<OrderItem> {
    let mut items: Vec<OrderItem> = inner
        .order_items
        .values()
        .filter(|item| item.order_id == order_id)
        .cloned()
        .collect();
    items.sort_by_key(|item| item.id);
    items
}

impl StoreInner {
    fn insert_order(&mut self, new: NewOrder, items: Vec<NewOrderItem>) -> Order {
        let now = Utc::now();
        let order_id = self.order_seq.next();
        let order = Order {
            id: order_id,
            user_id: new.user_id,
            status: new.status,
            shipping_address: new.shipping.address,
            shipping_city: new.shipping.city,
            shipping_state: new.shipping.state,
            shipping_zip_code: new.shipping.zip_code,
            shipping_country: new.shipping.country,
            total: new.total,
            created_at: now,
            updated_at: now,
        };
        self.orders.insert(order_id, order.clone());

        for new_item in items {
            let id = self.order_item_seq.next();
            let item = OrderItem {
                id,
                order_id,
                product_id: new_item.product_id,
                quantity: new_item.quantity,
                price: new_item.price,
            };
            self.order_items.insert(id, item);
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            country: "USA".into(),
        }
    }

    fn widget(category_id: i32, price: f64) -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            description: "A widget".into(),
            price,
            old_price: None,
            image_url: None,
            category_id,
            stock: 10,
            rating: 0.0,
            rating_count: 0,
            is_featured: false,
            is_popular: false,
        }
    }

    #[tokio::test]
    async fn ids_are_monotonic_per_entity() {
        let store = Store::new();
        let a = store
            .create_category(NewCategory {
                name: "A".into(),
                description: None,
            })
            .await;
        let b = store
            .create_category(NewCategory {
                name: "B".into(),
                description: None,
            })
            .await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        // Deleting does not recycle ids.
        assert!(store.delete_category(a.id).await);
        let c = store
            .create_category(NewCategory {
                name: "C".into(),
                description: None,
            })
            .await;
        assert_eq!(c.id, 3);

        // Counters are independent across entity types.
        let p = store.create_product(widget(b.id, 5.0)).await;
        assert_eq!(p.id, 1);
    }

    #[tokio::test]
    async fn cart_insert_merges_existing_pair() {
        let store = Store::new();
        let first = store
            .create_cart_item(NewCartItem {
                user_id: 1,
                product_id: 7,
                quantity: 2,
            })
            .await;
        let merged = store
            .create_cart_item(NewCartItem {
                user_id: 1,
                product_id: 7,
                quantity: 1,
            })
            .await;
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 3);
        assert_eq!(store.cart_items(1).await.len(), 1);

        let looked_up = store.cart_item_by_user_and_product(1, 7).await;
        assert_eq!(looked_up.map(|item| item.quantity), Some(3));

        // A different user gets their own row.
        let other = store
            .create_cart_item(NewCartItem {
                user_id: 2,
                product_id: 7,
                quantity: 1,
            })
            .await;
        assert_ne!(other.id, first.id);
    }

    #[tokio::test]
    async fn create_order_persists_items_together() {
        let store = Store::new();
        let order = store
            .create_order(
                NewOrder {
                    user_id: 1,
                    status: OrderStatus::Pending,
                    shipping: shipping(),
                    total: 30.0,
                },
                vec![
                    NewOrderItem {
                        product_id: 1,
                        quantity: 2,
                        price: 10.0,
                    },
                    NewOrderItem {
                        product_id: 2,
                        quantity: 1,
                        price: 10.0,
                    },
                ],
            )
            .await;

        let fetched = store.order(order.id).await;
        assert!(fetched.is_some());
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn checkout_requires_purchasable_lines() {
        let store = Store::new();
        assert!(store.checkout_cart(1, shipping()).await.is_none());

        // A cart line whose product is gone is not purchasable either.
        store
            .create_cart_item(NewCartItem {
                user_id: 1,
                product_id: 99,
                quantity: 1,
            })
            .await;
        assert!(store.checkout_cart(1, shipping()).await.is_none());
    }
}
