use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

/// New variant row passed to [`ProductRepository::create`].
pub struct NewVariant {
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
}

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a product together with its variants.
    pub async fn create(
        &self,
        sku: String,
        name: String,
        description: Option<String>,
        category: String,
        price: Decimal,
        currency: String,
        variants: Vec<NewVariant>,
    ) -> Result<(entity::product::Model, Vec<entity::product_variant::Model>), DbErr> {
        let now = Utc::now().naive_utc();

        let product = entity::product::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            sku: ActiveValue::Set(sku),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            category: ActiveValue::Set(category),
            price: ActiveValue::Set(price),
            currency: ActiveValue::Set(currency),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        let product = product.insert(self.db).await?;

        if variants.is_empty() {
            return Ok((product, Vec::new()));
        }

        let variant_models = variants.into_iter().map(|variant| {
            entity::product_variant::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                product_id: ActiveValue::Set(product.id),
                size: ActiveValue::Set(variant.size),
                color: ActiveValue::Set(variant.color),
                stock_quantity: ActiveValue::Set(variant.stock_quantity),
                created_at: ActiveValue::Set(now),
            }
        });

        let variants = entity::prelude::ProductVariant::insert_many(variant_models)
            .exec_with_returning(self.db)
            .await?;

        Ok((product, variants))
    }

    pub async fn get_by_id(
        &self,
        product_id: Uuid,
    ) -> Result<Option<entity::product::Model>, DbErr> {
        entity::prelude::Product::find_by_id(product_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_sku(&self, sku: &str) -> Result<Option<entity::product::Model>, DbErr> {
        entity::prelude::Product::find()
            .filter(entity::product::Column::Sku.eq(sku))
            .one(self.db)
            .await
    }

    pub async fn get_variants(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<entity::product_variant::Model>, DbErr> {
        entity::prelude::ProductVariant::find()
            .filter(entity::product_variant::Column::ProductId.eq(product_id))
            .all(self.db)
            .await
    }

    pub async fn get_variant(
        &self,
        variant_id: Uuid,
    ) -> Result<Option<entity::product_variant::Model>, DbErr> {
        entity::prelude::ProductVariant::find_by_id(variant_id)
            .one(self.db)
            .await
    }

    /// Lists products, optionally filtered by category and a name substring.
    /// Inactive products are excluded unless `include_inactive` is set.
    pub async fn list(
        &self,
        category: Option<&str>,
        search: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<entity::product::Model>, DbErr> {
        let mut query = entity::prelude::Product::find();

        if let Some(category) = category {
            query = query.filter(entity::product::Column::Category.eq(category));
        }

        if let Some(search) = search {
            query = query.filter(entity::product::Column::Name.contains(search));
        }

        if !include_inactive {
            query = query.filter(entity::product::Column::Active.eq(true));
        }

        query
            .order_by_asc(entity::product::Column::Name)
            .all(self.db)
            .await
    }

    /// Applies the provided field updates, leaving other columns untouched.
    pub async fn update(
        &self,
        product: entity::product::Model,
        name: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        active: Option<bool>,
    ) -> Result<entity::product::Model, DbErr> {
        let mut product: entity::product::ActiveModel = product.into();

        if let Some(name) = name {
            product.name = ActiveValue::Set(name);
        }

        if let Some(description) = description {
            product.description = ActiveValue::Set(Some(description));
        }

        if let Some(price) = price {
            product.price = ActiveValue::Set(price);
        }

        if let Some(active) = active {
            product.active = ActiveValue::Set(active);
        }

        product.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        product.update(self.db).await
    }

    /// Writes a new stock quantity for a variant.
    pub async fn set_variant_stock(
        &self,
        variant: entity::product_variant::Model,
        stock_quantity: i32,
    ) -> Result<entity::product_variant::Model, DbErr> {
        let mut variant: entity::product_variant::ActiveModel = variant.into();
        variant.stock_quantity = ActiveValue::Set(stock_quantity);

        variant.update(self.db).await
    }
}
