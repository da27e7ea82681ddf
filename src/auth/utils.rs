use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

pub fn require_examiner(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Examiner {
        return Err(AppError::Unauthorized(
            "Only examiners can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_examinee(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Examinee {
        return Err(AppError::Unauthorized(
            "Only examinees can perform this action".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims(sub: &str, role: UserRole) -> Claims {
        Claims {
            sub: sub.to_string(),
            name: "Test User".to_string(),
            email: format!("{}@example.com", sub),
            role,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_require_examiner() {
        let examiner = create_test_claims("examiner", UserRole::Examiner);
        assert!(require_examiner(&examiner).is_ok());

        let examinee = create_test_claims("examinee", UserRole::Examinee);
        assert!(require_examiner(&examinee).is_err());
    }

    #[test]
    fn test_require_examinee() {
        let examinee = create_test_claims("examinee", UserRole::Examinee);
        assert!(require_examinee(&examinee).is_ok());

        let examiner = create_test_claims("examiner", UserRole::Examiner);
        assert!(require_examinee(&examiner).is_err());
    }
}
