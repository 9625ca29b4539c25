use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::Error;

/// Session key holding the logged-in user's ID.
pub const SESSION_USER_ID_KEY: &str = "atelier:user:id";

/// Logged-in user ID stored in the session, serialized as a string.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Insert user ID into session
    pub async fn insert(session: &Session, user_id: Uuid) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<Uuid>, Error> {
        session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id_str)| {
                id_str.parse::<Uuid>().map_err(|e| {
                    Error::ParseError(format!("Failed to parse session user id: {}", e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    mod session_insert_user_id_tests {
        use atelier_test_utils::prelude::*;
        use uuid::Uuid;

        use crate::model::session::SessionUserId;

        #[tokio::test]
        /// Expect success when inserting valid user ID into session
        async fn test_insert_session_user_id_success() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let user_id = Uuid::new_v4();
            let result = SessionUserId::insert(&test.session, user_id).await;

            assert!(result.is_ok());

            Ok(())
        }
    }

    mod session_get_user_id_tests {
        use atelier_test_utils::prelude::*;
        use uuid::Uuid;

        use crate::model::session::{SessionUserId, SESSION_USER_ID_KEY};

        #[tokio::test]
        /// Expect Some when user ID is present in session
        async fn test_get_session_user_id_some() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let user_id = Uuid::new_v4();
            SessionUserId::insert(&test.session, user_id).await.unwrap();

            let result = SessionUserId::get(&test.session).await;

            assert!(result.is_ok());
            let user_id_opt = result.unwrap();

            assert!(user_id_opt.is_some());
            assert_eq!(user_id_opt.unwrap(), user_id);

            Ok(())
        }

        #[tokio::test]
        /// Expect None when no user ID is present in session
        async fn test_get_session_user_id_none() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let result = SessionUserId::get(&test.session).await;

            assert!(result.is_ok());
            let user_id_opt = result.unwrap();

            assert!(user_id_opt.is_none());

            Ok(())
        }

        #[tokio::test]
        /// Expect parse error when user ID inserted into session is not a UUID
        async fn test_get_session_user_id_parse_error() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            // Insert a user ID string which will fail UUID parse
            let user_id = "invalid_id";
            test.session
                .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
                .await?;

            let result = SessionUserId::get(&test.session).await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
