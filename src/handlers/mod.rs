pub mod activity;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod profile;

use actix_web::HttpRequest;
use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::models::user::AccountRecord;
use crate::utils::jwt::Claims;

/// Load the account named by the request's verified claims.
pub(crate) async fn current_account(pool: &PgPool, claims: &Claims) -> Result<AccountRecord, AppError> {
    let found = db::accounts::find_account_by_id(pool, claims.account_id()?).await?;
    require_account(found)
}

fn require_account(found: Option<AccountRecord>) -> Result<AccountRecord, AppError> {
    found.ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Address of the connected peer. Forwarding headers are client-controlled
/// and are not consulted.
pub(crate) fn remote_addr(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::ResponseError;

    #[test]
    fn remote_addr_ignores_forwarded_headers() {
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:4000".parse().unwrap())
            .insert_header(("X-Forwarded-For", "6.6.6.6"))
            .insert_header(("Forwarded", "for=6.6.6.6"))
            .to_http_request();

        assert_eq!(remote_addr(&req), "10.1.2.3");
    }

    #[test]
    fn remote_addr_without_peer_is_unknown() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(remote_addr(&req), "unknown");
    }

    #[test]
    fn missing_account_is_not_found() {
        match require_account(None) {
            Err(err) => assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND),
            Ok(_) => panic!("missing account must not resolve"),
        }
    }
}
