//! Promo code administration service.

use sea_orm::DatabaseConnection;

use crate::{
    data::promo::PromoRepository,
    error::{payment::PaymentError, Error},
    model::loyalty::{CreatePromoDto, PromoCodeDto},
    util,
};

/// Length of generated promo codes.
const GENERATED_CODE_LENGTH: usize = 8;

/// Service for creating and listing promo codes. Validation at checkout
/// lives with the order service.
pub struct PromoService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PromoService<'a> {
    /// Creates a new instance of [`PromoService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a promo code; a random code is generated when none is given.
    pub async fn create_code(&self, dto: CreatePromoDto) -> Result<PromoCodeDto, Error> {
        if !(1..=100).contains(&dto.percent_off) {
            return Err(PaymentError::InvalidPercentOff(dto.percent_off).into());
        }

        let promo_repo = PromoRepository::new(self.db);

        let code = match dto.code {
            Some(code) => code,
            None => util::code::generate_code(GENERATED_CODE_LENGTH),
        };

        if promo_repo.get_by_code(&code).await?.is_some() {
            return Err(PaymentError::DuplicatePromoCode(code).into());
        }

        let promo = promo_repo
            .create(code, dto.percent_off, dto.expires_at)
            .await?;

        tracing::info!(code = %promo.code, percent_off = promo.percent_off, "Promo code created");

        Ok(PromoCodeDto::from(promo))
    }

    /// Lists every promo code, newest first.
    pub async fn list_codes(&self) -> Result<Vec<PromoCodeDto>, Error> {
        let promo_repo = PromoRepository::new(self.db);

        let promos = promo_repo.list().await?;

        Ok(promos.into_iter().map(PromoCodeDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;

    use crate::{
        error::{payment::PaymentError, Error},
        model::loyalty::CreatePromoDto,
        service::promo::PromoService,
    };

    /// Expect a generated code when none is supplied
    #[tokio::test]
    async fn generates_code_when_omitted() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::PromoCode)?;

        let promo_service = PromoService::new(&test.state.db);
        let promo = promo_service
            .create_code(CreatePromoDto {
                code: None,
                percent_off: 15,
                expires_at: None,
            })
            .await?;

        assert_eq!(promo.code.len(), 8);
        assert!(promo.active);

        Ok(())
    }

    /// Expect an out-of-range percentage to be rejected
    #[tokio::test]
    async fn rejects_invalid_percent() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::PromoCode)?;

        let promo_service = PromoService::new(&test.state.db);

        for percent in [0, 101, -5] {
            let result = promo_service
                .create_code(CreatePromoDto {
                    code: Some("SAVE".to_string()),
                    percent_off: percent,
                    expires_at: None,
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::PaymentError(PaymentError::InvalidPercentOff(_)))
            ));
        }

        Ok(())
    }

    /// Expect a duplicate code to be rejected before hitting the database
    #[tokio::test]
    async fn rejects_duplicate_code() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::PromoCode)?;

        let promo_service = PromoService::new(&test.state.db);
        promo_service
            .create_code(CreatePromoDto {
                code: Some("SAVE10".to_string()),
                percent_off: 10,
                expires_at: None,
            })
            .await?;

        let result = promo_service
            .create_code(CreatePromoDto {
                code: Some("SAVE10".to_string()),
                percent_off: 20,
                expires_at: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(Error::PaymentError(PaymentError::DuplicatePromoCode(_)))
        ));

        Ok(())
    }
}
