use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = i64;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;

    fn id(&self) -> &i64 { &self.id }

    /// Creates a new Product from an already validated payload.
    ///
    /// # Arguments
    /// * `id` - Identifier issued by the store
    /// * `params` - Product creation parameters containing name, price, and stock
    fn from_create(id: i64, params: ProductCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
        })
    }

    /// Applies the fields present in the patch; the rest keep their values.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_patch_touches_only_given_fields() {
        let mut product = Product::new(1, "Widget", Decimal::new(1999, 2), 10);
        let patch = ProductPatch { stock: Some(-2), ..ProductPatch::default() };

        product.on_update(patch).unwrap();

        assert_eq!(product, Product::new(1, "Widget", Decimal::new(1999, 2), -2));
    }
}
