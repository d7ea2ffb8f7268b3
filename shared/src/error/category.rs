use super::ErrorCode;

/// Error category derived from the numeric range of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 0xxx: validation and generic request errors
    General,
    /// 1xxx: authentication and session errors
    Auth,
    /// 2xxx: permission errors
    Permission,
    /// 3xxx: company profile errors
    Company,
    /// 4xxx: order workflow errors
    Order,
    /// 6xxx: product catalog errors
    Product,
    /// 9xxx: internal system errors
    System,
}

impl ErrorCategory {
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorCategory::General => "general",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Permission => "permission",
            ErrorCategory::Company => "company",
            ErrorCategory::Order => "order",
            ErrorCategory::Product => "product",
            ErrorCategory::System => "system",
        }
    }
}

impl ErrorCode {
    /// Category of this code, by numeric range
    pub const fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            3000..=3999 => ErrorCategory::Company,
            4000..=4999 => ErrorCategory::Order,
            6000..=6999 => ErrorCategory::Product,
            _ => ErrorCategory::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_expected_categories() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidOtp.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::PermissionDenied.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::CompanyAlreadyExists.category(), ErrorCategory::Company);
        assert_eq!(ErrorCode::ConcurrentUpdate.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::ProductHasPurchases.category(), ErrorCategory::Product);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
