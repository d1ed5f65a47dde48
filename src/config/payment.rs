//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment gateway configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Gateway API base URL
    pub gateway_base_url: String,

    /// Merchant store identifier
    pub store_id: String,

    /// Merchant store password
    pub store_password: String,

    /// Public base URL of this API, used to build the gateway's
    /// success/fail/cancel callback URLs
    pub public_base_url: String,

    /// Client dashboard URL the payer is redirected to after a callback
    pub dashboard_url: String,

    /// Use the in-process mock gateway instead of the real one
    #[serde(default)]
    pub use_mock_gateway: bool,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.use_mock_gateway {
            // The mock needs no credentials; only the redirect targets.
            if self.dashboard_url.is_empty() {
                return Err(ValidationError::MissingRequired("PAYMENT_DASHBOARD_URL"));
            }
            return Ok(());
        }

        if self.gateway_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_GATEWAY_BASE_URL"));
        }
        if self.store_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_STORE_ID"));
        }
        if self.store_password.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_STORE_PASSWORD"));
        }
        if self.public_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_PUBLIC_BASE_URL"));
        }
        if self.dashboard_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_DASHBOARD_URL"));
        }

        if !self.gateway_base_url.starts_with("http://")
            && !self.gateway_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidPublicBaseUrl);
        }
        if !self.dashboard_url.starts_with("http://")
            && !self.dashboard_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidDashboardUrl);
        }

        if *environment == Environment::Production
            && !self.gateway_base_url.starts_with("https://")
        {
            return Err(ValidationError::GatewayMustBeHttps);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            gateway_base_url: "https://sandbox.gateway.test".to_string(),
            store_id: "mindharbor-dev".to_string(),
            store_password: "pw".to_string(),
            public_base_url: "https://api.mindharbor.test".to_string(),
            dashboard_url: "https://app.mindharbor.test/dashboard".to_string(),
            use_mock_gateway: false,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn missing_store_id_fails() {
        let config = PaymentConfig {
            store_id: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn http_gateway_allowed_outside_production() {
        let config = PaymentConfig {
            gateway_base_url: "http://localhost:9000".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn http_gateway_rejected_in_production() {
        let config = PaymentConfig {
            gateway_base_url: "http://gateway.test".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn mock_gateway_needs_only_the_dashboard_url() {
        let config = PaymentConfig {
            use_mock_gateway: true,
            dashboard_url: "http://localhost:5173/dashboard".to_string(),
            ..PaymentConfig::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn mock_gateway_without_dashboard_fails() {
        let config = PaymentConfig {
            use_mock_gateway: true,
            ..PaymentConfig::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn malformed_dashboard_url_fails() {
        let config = PaymentConfig {
            dashboard_url: "dashboard".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }
}
