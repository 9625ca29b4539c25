//! Product catalog service.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::catalog::{NewVariant, ProductRepository},
    error::{catalog::CatalogError, Error},
    model::{
        catalog::{
            AdjustStockDto, CreateProductDto, ProductDto, ProductListQuery, UpdateProductDto,
            VariantDto,
        },
        money::Money,
    },
};

/// Service for managing products and their variants.
pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogService<'a> {
    /// Creates a new instance of [`CatalogService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product with its variants. The price is validated through
    /// [`Money`], and the SKU must be unused.
    pub async fn create_product(&self, dto: CreateProductDto) -> Result<ProductDto, Error> {
        let product_repo = ProductRepository::new(self.db);

        let price = Money::new(dto.price)?;

        if product_repo.get_by_sku(&dto.sku).await?.is_some() {
            return Err(CatalogError::DuplicateSku(dto.sku).into());
        }

        let variants = dto
            .variants
            .into_iter()
            .map(|variant| NewVariant {
                size: variant.size,
                color: variant.color,
                stock_quantity: variant.stock_quantity.max(0),
            })
            .collect();

        let (product, variants) = product_repo
            .create(
                dto.sku,
                dto.name,
                dto.description,
                dto.category,
                price.amount(),
                dto.currency,
                variants,
            )
            .await?;

        Ok(ProductDto::from_models(product, variants))
    }

    /// Retrieves a product with its variants.
    pub async fn get_product(&self, product_id: Uuid) -> Result<ProductDto, Error> {
        let product_repo = ProductRepository::new(self.db);

        let product = product_repo
            .get_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))?;

        let variants = product_repo.get_variants(product.id).await?;

        Ok(ProductDto::from_models(product, variants))
    }

    /// Lists products matching the query filters, each with its variants.
    pub async fn list_products(&self, query: ProductListQuery) -> Result<Vec<ProductDto>, Error> {
        let product_repo = ProductRepository::new(self.db);

        let products = product_repo
            .list(
                query.category.as_deref(),
                query.search.as_deref(),
                query.include_inactive.unwrap_or(false),
            )
            .await?;

        let mut dtos = Vec::with_capacity(products.len());

        for product in products {
            let variants = product_repo.get_variants(product.id).await?;
            dtos.push(ProductDto::from_models(product, variants));
        }

        Ok(dtos)
    }

    /// Applies partial updates to a product.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<ProductDto, Error> {
        let product_repo = ProductRepository::new(self.db);

        let product = product_repo
            .get_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))?;

        let price = match dto.price {
            Some(price) => Some(Money::new(price)?.amount()),
            None => None,
        };

        let product = product_repo
            .update(product, dto.name, dto.description, price, dto.active)
            .await?;

        let variants = product_repo.get_variants(product.id).await?;

        Ok(ProductDto::from_models(product, variants))
    }

    /// Applies a signed stock adjustment to a variant, refusing to go
    /// below zero.
    pub async fn adjust_stock(
        &self,
        variant_id: Uuid,
        dto: AdjustStockDto,
    ) -> Result<VariantDto, Error> {
        let product_repo = ProductRepository::new(self.db);

        let variant = product_repo
            .get_variant(variant_id)
            .await?
            .ok_or(CatalogError::VariantNotFound(variant_id))?;

        let new_quantity = variant.stock_quantity + dto.delta;

        if new_quantity < 0 {
            return Err(CatalogError::NegativeStock { variant_id }.into());
        }

        let variant = product_repo
            .set_variant_stock(variant, new_quantity)
            .await?;

        Ok(VariantDto::from(variant))
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use rust_decimal::Decimal;

    use crate::{
        error::{catalog::CatalogError, Error},
        model::catalog::{
            AdjustStockDto, CreateProductDto, CreateVariantDto, ProductListQuery, UpdateProductDto,
        },
        service::catalog::CatalogService,
    };

    fn create_dto(sku: &str) -> CreateProductDto {
        CreateProductDto {
            sku: sku.to_string(),
            name: "Boxy Tee".to_string(),
            description: Some("Oversized cotton tee".to_string()),
            category: "tops".to_string(),
            price: Decimal::new(2900, 2),
            currency: "USD".to_string(),
            variants: vec![CreateVariantDto {
                size: "M".to_string(),
                color: "black".to_string(),
                stock_quantity: 8,
            }],
        }
    }

    /// Expect success when creating a product with a fresh SKU
    #[tokio::test]
    async fn creates_product() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Product,
            entity::prelude::ProductVariant
        )?;

        let catalog_service = CatalogService::new(&test.state.db);
        let result = catalog_service.create_product(create_dto("TEE-001")).await;

        assert!(result.is_ok(), "Error: {:?}", result);
        let product = result.unwrap();
        assert_eq!(product.sku, "TEE-001");
        assert_eq!(product.variants.len(), 1);

        Ok(())
    }

    /// Expect DuplicateSku when reusing an existing SKU
    #[tokio::test]
    async fn rejects_duplicate_sku() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Product,
            entity::prelude::ProductVariant
        )?;

        let catalog_service = CatalogService::new(&test.state.db);
        catalog_service.create_product(create_dto("TEE-001")).await?;

        let result = catalog_service.create_product(create_dto("TEE-001")).await;

        assert!(matches!(
            result,
            Err(Error::CatalogError(CatalogError::DuplicateSku(_)))
        ));

        Ok(())
    }

    /// Expect MoneyError when creating a product with a negative price
    #[tokio::test]
    async fn rejects_negative_price() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Product,
            entity::prelude::ProductVariant
        )?;

        let mut dto = create_dto("TEE-001");
        dto.price = Decimal::new(-2900, 2);

        let catalog_service = CatalogService::new(&test.state.db);
        let result = catalog_service.create_product(dto).await;

        assert!(matches!(result, Err(Error::MoneyError(_))));

        Ok(())
    }

    /// Expect prices with extra precision to be rounded to two decimals
    #[tokio::test]
    async fn rounds_price_to_two_decimals() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Product,
            entity::prelude::ProductVariant
        )?;

        let mut dto = create_dto("TEE-001");
        dto.price = Decimal::new(10005, 3); // 10.005

        let catalog_service = CatalogService::new(&test.state.db);
        let product = catalog_service.create_product(dto).await.unwrap();

        assert_eq!(product.price, Decimal::new(1001, 2));

        Ok(())
    }

    /// Expect deactivated products to disappear from the default listing
    #[tokio::test]
    async fn deactivated_product_leaves_listing() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Product,
            entity::prelude::ProductVariant
        )?;

        let catalog_service = CatalogService::new(&test.state.db);
        let product = catalog_service.create_product(create_dto("TEE-001")).await?;

        catalog_service
            .update_product(
                product.id,
                UpdateProductDto {
                    name: None,
                    description: None,
                    price: None,
                    active: Some(false),
                },
            )
            .await?;

        let listing = catalog_service
            .list_products(ProductListQuery {
                category: None,
                search: None,
                include_inactive: None,
            })
            .await?;

        assert!(listing.is_empty());

        Ok(())
    }

    /// Expect NegativeStock when an adjustment would underflow
    #[tokio::test]
    async fn rejects_stock_underflow() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Product,
            entity::prelude::ProductVariant
        )?;

        let catalog_service = CatalogService::new(&test.state.db);
        let product = catalog_service.create_product(create_dto("TEE-001")).await?;
        let variant_id = product.variants[0].id;

        let result = catalog_service
            .adjust_stock(variant_id, AdjustStockDto { delta: -20 })
            .await;

        assert!(matches!(
            result,
            Err(Error::CatalogError(CatalogError::NegativeStock { .. }))
        ));

        let variant = catalog_service
            .adjust_stock(variant_id, AdjustStockDto { delta: -3 })
            .await?;
        assert_eq!(variant.stock_quantity, 5);

        Ok(())
    }
}
