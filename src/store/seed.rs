use crate::models::{NewCategory, NewProduct};

use super::Store;

const CATEGORIES: [(&str, &str); 8] = [
    ("Electronics", "Premium gadgets and devices"),
    ("Fashion", "Luxury apparel and accessories"),
    ("Home & Decor", "Elegant home furnishings"),
    ("Books", "Curated collection of literature"),
    ("Jewelry", "Fine jewelry and timepieces"),
    ("Beauty", "Premium skincare and cosmetics"),
    ("Gourmet", "Artisanal foods and beverages"),
    ("Travel", "Luxury travel accessories"),
];

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    old_price: Option<f64>,
    image_url: &'static str,
    category_id: i32,
    stock: i32,
    rating: f64,
    rating_count: i32,
    is_featured: bool,
    is_popular: bool,
}

const PRODUCTS: [SeedProduct; 12] = [
    SeedProduct {
        name: "Bose QuietComfort Ultra Headphones",
        description: "Immersive sound with 40h battery life and spatial audio",
        price: 349.99,
        old_price: Some(429.99),
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e",
        category_id: 1,
        stock: 50,
        rating: 4.8,
        rating_count: 257,
        is_featured: true,
        is_popular: true,
    },
    SeedProduct {
        name: "MacBook Pro M3 Max",
        description: "48GB RAM, 2TB SSD, M3 Max Processor",
        price: 2899.99,
        old_price: Some(3299.99),
        image_url: "https://images.unsplash.com/photo-1531297484001-80022131f5a1",
        category_id: 1,
        stock: 25,
        rating: 5.0,
        rating_count: 189,
        is_featured: true,
        is_popular: true,
    },
    SeedProduct {
        name: "Sony A7IV Mirrorless Camera",
        description: "33MP full-frame sensor, 4K60p video, 10-bit color depth",
        price: 2499.99,
        old_price: Some(2799.99),
        image_url: "https://images.unsplash.com/photo-1516035069371-29a1b244cc32",
        category_id: 1,
        stock: 18,
        rating: 4.9,
        rating_count: 94,
        is_featured: true,
        is_popular: false,
    },
    SeedProduct {
        name: "Artisan Leather Weekender Bag",
        description: "Full-grain leather, handcrafted in Italy",
        price: 589.99,
        old_price: Some(749.99),
        image_url: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62",
        category_id: 2,
        stock: 30,
        rating: 4.9,
        rating_count: 78,
        is_featured: true,
        is_popular: false,
    },
    SeedProduct {
        name: "Designer Silk Evening Dress",
        description: "Handmade in Paris, bias-cut pure silk",
        price: 1299.99,
        old_price: None,
        image_url: "https://images.unsplash.com/photo-1566174053879-31528523f8cb",
        category_id: 2,
        stock: 12,
        rating: 5.0,
        rating_count: 27,
        is_featured: true,
        is_popular: true,
    },
    SeedProduct {
        name: "Luxury Egyptian Cotton Bedding Set",
        description: "1000 thread count, organic cotton, 4-piece set",
        price: 349.99,
        old_price: Some(429.99),
        image_url: "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af",
        category_id: 3,
        stock: 25,
        rating: 4.9,
        rating_count: 71,
        is_featured: true,
        is_popular: true,
    },
    SeedProduct {
        name: "Limited Edition Collector's Atlas",
        description: "Hand-bound in leather with gold embossing",
        price: 189.99,
        old_price: Some(249.99),
        image_url: "https://images.unsplash.com/photo-1589998059171-988d887df646",
        category_id: 4,
        stock: 15,
        rating: 4.9,
        rating_count: 28,
        is_featured: true,
        is_popular: false,
    },
    SeedProduct {
        name: "Diamond Eternity Band",
        description: "1.5 carat total weight, platinum setting",
        price: 2499.99,
        old_price: Some(2999.99),
        image_url: "https://images.unsplash.com/photo-1603561591411-07134e71a2a9",
        category_id: 5,
        stock: 10,
        rating: 5.0,
        rating_count: 32,
        is_featured: true,
        is_popular: true,
    },
    SeedProduct {
        name: "Swiss Automatic Chronograph",
        description: "Sapphire crystal, exhibition caseback",
        price: 3299.99,
        old_price: None,
        image_url: "https://images.unsplash.com/photo-1533139143976-30918502365b",
        category_id: 5,
        stock: 8,
        rating: 4.9,
        rating_count: 21,
        is_featured: false,
        is_popular: true,
    },
    SeedProduct {
        name: "Luxury Skincare Collection",
        description: "Anti-aging serum, cream, and eye treatment",
        price: 499.99,
        old_price: Some(599.99),
        image_url: "https://images.unsplash.com/photo-1571781926291-c477ebfd024b",
        category_id: 6,
        stock: 25,
        rating: 4.7,
        rating_count: 89,
        is_featured: true,
        is_popular: true,
    },
    SeedProduct {
        name: "Single-Origin Coffee Collection",
        description: "Four premium beans from around the world",
        price: 89.99,
        old_price: Some(109.99),
        image_url: "https://images.unsplash.com/photo-1559526323-cb2f2fe2591b",
        category_id: 7,
        stock: 50,
        rating: 4.6,
        rating_count: 112,
        is_featured: false,
        is_popular: true,
    },
    SeedProduct {
        name: "Premium Cabin Luggage Set",
        description: "Aircraft-grade aluminum with leather accents",
        price: 799.99,
        old_price: Some(999.99),
        image_url: "https://images.unsplash.com/photo-1565026057757-f7a9a593716a",
        category_id: 8,
        stock: 15,
        rating: 4.8,
        rating_count: 67,
        is_featured: true,
        is_popular: true,
    },
];

impl Store {
    /// Loads the demo catalog. Intended for a fresh store; no admin account
    /// or credentials are seeded here.
    pub async fn seed_catalog(&self) {
        for (name, description) in CATEGORIES {
            self.create_category(NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await;
        }

        for seed in &PRODUCTS {
            self.create_product(NewProduct {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                price: seed.price,
                old_price: seed.old_price,
                image_url: Some(seed.image_url.to_string()),
                category_id: seed.category_id,
                stock: seed.stock,
                rating: seed.rating,
                rating_count: seed.rating_count,
                is_featured: seed.is_featured,
                is_popular: seed.is_popular,
            })
            .await;
        }

        tracing::info!(
            categories = CATEGORIES.len(),
            products = PRODUCTS.len(),
            "demo catalog seeded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_catalog_is_consistent() {
        let store = Store::new();
        store.seed_catalog().await;

        let categories = store.categories().await;
        assert_eq!(categories.len(), CATEGORIES.len());
        assert_eq!(store.products().await.len(), PRODUCTS.len());

        // Every seeded product resolves to an existing category, so the
        // joined listing loses nothing.
        let joined = store.products_with_category().await;
        assert_eq!(joined.len(), PRODUCTS.len());
    }
}
