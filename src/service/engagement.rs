//! Engagement service (product reviews, wishlists).

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::{
        catalog::ProductRepository,
        engagement::{review::ReviewRepository, wishlist::WishlistRepository},
    },
    error::{catalog::CatalogError, engagement::EngagementError, Error},
    model::engagement::{CreateReviewDto, ReviewDto, WishlistItemDto},
};

/// Service for product reviews and wishlists.
pub struct EngagementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EngagementService<'a> {
    /// Creates a new instance of [`EngagementService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a review, one per user and product, rating 1 through 5.
    pub async fn create_review(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        dto: CreateReviewDto,
    ) -> Result<ReviewDto, Error> {
        if !(1..=5).contains(&dto.rating) {
            return Err(EngagementError::InvalidRating(dto.rating).into());
        }

        let product_repo = ProductRepository::new(self.db);
        let review_repo = ReviewRepository::new(self.db);

        product_repo
            .get_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))?;

        if review_repo
            .find_by_product_and_user(product_id, user_id)
            .await?
            .is_some()
        {
            return Err(EngagementError::DuplicateReview.into());
        }

        let review = review_repo
            .create(product_id, user_id, dto.rating, dto.body)
            .await?;

        Ok(ReviewDto::from(review))
    }

    /// Lists the published reviews for a product, newest first.
    pub async fn list_reviews(&self, product_id: Uuid) -> Result<Vec<ReviewDto>, Error> {
        let product_repo = ProductRepository::new(self.db);
        let review_repo = ReviewRepository::new(self.db);

        product_repo
            .get_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))?;

        let reviews = review_repo.list_published(product_id).await?;

        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    /// Hides a review from the public listing, for staff moderation.
    pub async fn unpublish_review(&self, review_id: Uuid) -> Result<ReviewDto, Error> {
        let review_repo = ReviewRepository::new(self.db);

        let review = review_repo
            .get_by_id(review_id)
            .await?
            .ok_or(EngagementError::ReviewNotFound(review_id))?;

        let review = review_repo.set_published(review, false).await?;

        tracing::info!(review_id = %review.id, "Review unpublished");

        Ok(ReviewDto::from(review))
    }

    /// Adds a product to the user's wishlist; re-adding is a no-op.
    pub async fn add_to_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistItemDto, Error> {
        let product_repo = ProductRepository::new(self.db);
        let wishlist_repo = WishlistRepository::new(self.db);

        product_repo
            .get_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))?;

        let item = wishlist_repo.add(user_id, product_id).await?;

        Ok(WishlistItemDto::from(item))
    }

    /// Removes a product from the user's wishlist.
    pub async fn remove_from_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), Error> {
        let wishlist_repo = WishlistRepository::new(self.db);

        wishlist_repo.remove(user_id, product_id).await?;

        Ok(())
    }

    /// Lists the user's wishlist, newest first.
    pub async fn list_wishlist(&self, user_id: Uuid) -> Result<Vec<WishlistItemDto>, Error> {
        let wishlist_repo = WishlistRepository::new(self.db);

        let items = wishlist_repo.list_by_user(user_id).await?;

        Ok(items.into_iter().map(WishlistItemDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use atelier_test_utils::prelude::*;
    use uuid::Uuid;

    use crate::{
        error::{engagement::EngagementError, Error},
        model::engagement::CreateReviewDto,
        service::engagement::EngagementService,
    };

    fn review_dto(rating: i32) -> CreateReviewDto {
        CreateReviewDto {
            rating,
            body: Some("Runs large".to_string()),
        }
    }

    /// Expect ratings outside 1..=5 to be rejected
    #[tokio::test]
    async fn rejects_out_of_range_rating() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::ProductReview)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let engagement_service = EngagementService::new(&test.state.db);

        for rating in [0, 6, -1] {
            let result = engagement_service
                .create_review(user.id, product.id, review_dto(rating))
                .await;

            assert!(matches!(
                result,
                Err(Error::EngagementError(EngagementError::InvalidRating(_)))
            ));
        }

        Ok(())
    }

    /// Expect a second review of the same product by the same user to be rejected
    #[tokio::test]
    async fn rejects_duplicate_review() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::ProductReview)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let engagement_service = EngagementService::new(&test.state.db);
        engagement_service
            .create_review(user.id, product.id, review_dto(5))
            .await?;

        let result = engagement_service
            .create_review(user.id, product.id, review_dto(3))
            .await;

        assert!(matches!(
            result,
            Err(Error::EngagementError(EngagementError::DuplicateReview))
        ));

        Ok(())
    }

    /// Expect reviews of unknown products to be rejected
    #[tokio::test]
    async fn rejects_review_of_unknown_product() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::ProductReview)?;
        let user = test.users().insert_user(1).await?;

        let engagement_service = EngagementService::new(&test.state.db);
        let result = engagement_service
            .create_review(user.id, Uuid::new_v4(), review_dto(5))
            .await;

        assert!(matches!(result, Err(Error::CatalogError(_))));

        Ok(())
    }

    /// Expect unpublished reviews to disappear from the public listing
    #[tokio::test]
    async fn unpublish_hides_review() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::ProductReview)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let engagement_service = EngagementService::new(&test.state.db);
        let review = engagement_service
            .create_review(user.id, product.id, review_dto(4))
            .await?;

        assert_eq!(engagement_service.list_reviews(product.id).await?.len(), 1);

        engagement_service.unpublish_review(review.id).await?;

        assert!(engagement_service.list_reviews(product.id).await?.is_empty());

        Ok(())
    }

    /// Expect wishlist round-trip: add, list, remove
    #[tokio::test]
    async fn wishlist_round_trip() -> Result<(), TestError> {
        let mut test = test_setup_with_cart_tables!(entity::prelude::WishlistItem)?;
        let user = test.users().insert_user(1).await?;
        let (product, _) = test.catalog().insert_product_with_variant(1, 5).await?;

        let engagement_service = EngagementService::new(&test.state.db);
        engagement_service
            .add_to_wishlist(user.id, product.id)
            .await?;
        engagement_service
            .add_to_wishlist(user.id, product.id)
            .await?;

        let items = engagement_service.list_wishlist(user.id).await?;
        assert_eq!(items.len(), 1);

        engagement_service
            .remove_from_wishlist(user.id, product.id)
            .await?;

        assert!(engagement_service.list_wishlist(user.id).await?.is_empty());

        Ok(())
    }
}
