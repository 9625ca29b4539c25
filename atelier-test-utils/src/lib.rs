pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::{TestAppState, TestSetup};

pub mod prelude {
    pub use crate::{
        test_setup_with_care_tables, test_setup_with_cart_tables, test_setup_with_order_tables,
        test_setup_with_payment_tables, test_setup_with_tables, test_setup_with_user_tables,
        TestError, TestSetup,
    };
}
