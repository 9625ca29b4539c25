//! Cart service.
//!
//! Lines snapshot the product price at the time they are added, quantities
//! merge when the same variant is added twice, and every quantity change is
//! checked against the variant's stock.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::{analytics::AnalyticsRepository, cart::CartRepository, catalog::ProductRepository},
    error::{cart::CartError, catalog::CatalogError, Error},
    model::{
        analytics::EventKind,
        cart::{AddCartItemDto, CartDto, CartItemDto, UpdateCartItemDto},
        money::Money,
    },
};

/// Service for managing the current user's open cart.
pub struct CartService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CartService<'a> {
    /// Creates a new instance of [`CartService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the user's open cart, creating one if needed.
    pub async fn get_cart(&self, user_id: Uuid) -> Result<CartDto, Error> {
        let cart_repo = CartRepository::new(self.db);

        let cart = cart_repo.get_or_create_by_user(user_id).await?;

        self.build_dto(&cart_repo, cart.id).await
    }

    /// Adds a variant to the cart, merging quantities with an existing line
    /// for the same variant.
    pub async fn add_item(&self, user_id: Uuid, dto: AddCartItemDto) -> Result<CartDto, Error> {
        if dto.quantity <= 0 {
            return Err(CartError::InvalidQuantity(dto.quantity).into());
        }

        let cart_repo = CartRepository::new(self.db);
        let product_repo = ProductRepository::new(self.db);

        let variant = product_repo
            .get_variant(dto.variant_id)
            .await?
            .ok_or(CatalogError::VariantNotFound(dto.variant_id))?;

        let product = product_repo
            .get_by_id(variant.product_id)
            .await?
            .filter(|product| product.active)
            .ok_or(CatalogError::ProductNotFound(variant.product_id))?;

        let cart = cart_repo.get_or_create_by_user(user_id).await?;

        let requested = match cart_repo.find_item_by_variant(cart.id, variant.id).await? {
            Some(existing) => {
                let merged = existing.quantity + dto.quantity;
                self.check_stock(&variant, merged)?;
                cart_repo.update_item_quantity(existing, merged).await?;
                merged
            }
            None => {
                self.check_stock(&variant, dto.quantity)?;
                cart_repo
                    .insert_item(cart.id, variant.id, dto.quantity, product.price)
                    .await?;
                dto.quantity
            }
        };

        tracing::debug!(
            variant_id = %variant.id,
            quantity = requested,
            "Cart line updated"
        );

        let cart = cart_repo.touch(cart).await?;

        // Analytics are best-effort; a failed insert never fails the cart op
        let analytics_repo = AnalyticsRepository::new(self.db);
        if let Err(e) = analytics_repo
            .record(
                EventKind::AddToCart,
                Some(user_id),
                Some(product.id),
                None,
            )
            .await
        {
            tracing::warn!("Failed to record add_to_cart event: {:?}", e);
        }

        self.build_dto(&cart_repo, cart.id).await
    }

    /// Sets a line's quantity; zero removes the line.
    pub async fn update_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        dto: UpdateCartItemDto,
    ) -> Result<CartDto, Error> {
        if dto.quantity < 0 {
            return Err(CartError::InvalidQuantity(dto.quantity).into());
        }

        let cart_repo = CartRepository::new(self.db);
        let product_repo = ProductRepository::new(self.db);

        let cart = cart_repo.get_or_create_by_user(user_id).await?;
        let item = self.get_owned_item(&cart_repo, cart.id, item_id).await?;

        if dto.quantity == 0 {
            cart_repo.delete_item(item.id).await?;
        } else {
            let variant = product_repo
                .get_variant(item.variant_id)
                .await?
                .ok_or(CatalogError::VariantNotFound(item.variant_id))?;

            self.check_stock(&variant, dto.quantity)?;
            cart_repo.update_item_quantity(item, dto.quantity).await?;
        }

        let cart = cart_repo.touch(cart).await?;

        self.build_dto(&cart_repo, cart.id).await
    }

    /// Removes a line from the cart.
    pub async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<CartDto, Error> {
        let cart_repo = CartRepository::new(self.db);

        let cart = cart_repo.get_or_create_by_user(user_id).await?;
        let item = self.get_owned_item(&cart_repo, cart.id, item_id).await?;

        cart_repo.delete_item(item.id).await?;
        let cart = cart_repo.touch(cart).await?;

        self.build_dto(&cart_repo, cart.id).await
    }

    /// Removes every line from the cart.
    pub async fn clear(&self, user_id: Uuid) -> Result<CartDto, Error> {
        let cart_repo = CartRepository::new(self.db);

        let cart = cart_repo.get_or_create_by_user(user_id).await?;
        cart_repo.clear(cart.id).await?;

        self.build_dto(&cart_repo, cart.id).await
    }

    fn check_stock(
        &self,
        variant: &entity::product_variant::Model,
        requested: i32,
    ) -> Result<(), Error> {
        if requested > variant.stock_quantity {
            return Err(CartError::InsufficientStock {
                variant_id: variant.id,
                requested,
                available: variant.stock_quantity,
            }
            .into());
        }

        Ok(())
    }

    /// Fetches a cart item, masking lines that belong to another user's cart.
    async fn get_owned_item(
        &self,
        cart_repo: &CartRepository<'_, DatabaseConnection>,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> Result<entity::cart_item::Model, Error> {
        cart_repo
            .get_item(item_id)
            .await?
            .filter(|item| item.cart_id == cart_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id).into())
    }

    async fn build_dto(
        &self,
        cart_repo: &CartRepository<'_, DatabaseConnection>,
        cart_id: Uuid,
    ) -> Result<CartDto, Error> {
        let items = cart_repo.get_items(cart_id).await?;

        let mut subtotal = Money::ZERO;
        let mut item_dtos = Vec::with_capacity(items.len());

        for item in items {
            let line_total = Money::new(item.unit_price)?.times(item.quantity);
            subtotal = subtotal.add(line_total);

            item_dtos.push(CartItemDto {
                id: item.id,
                variant_id: item.variant_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: line_total.amount(),
            });
        }

        Ok(CartDto {
            id: cart_id,
            items: item_dtos,
            subtotal: subtotal.amount(),
        })
    }
}
