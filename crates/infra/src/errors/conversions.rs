//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use sigma_domain::SigmaError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SigmaError);

impl From<InfraError> for SigmaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SigmaError> for InfraError {
    fn from(value: SigmaError) -> Self {
        Self(value)
    }
}

trait IntoSigmaError {
    fn into_sigma(self) -> SigmaError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → SigmaError */
/* -------------------------------------------------------------------------- */

impl IntoSigmaError for KeyringError {
    fn into_sigma(self) -> SigmaError {
        match self {
            Self::NoEntry => SigmaError::NotFound("keychain entry not found".into()),
            Self::BadEncoding(_) => {
                SigmaError::Storage("credential in keychain is not valid UTF-8".into())
            }
            Self::TooLong(name, limit) => SigmaError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Self::Invalid(attr, reason) => {
                SigmaError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Self::Ambiguous(entries) => SigmaError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            Self::PlatformFailure(err) => {
                SigmaError::Storage(format!("keychain platform error: {err}"))
            }
            Self::NoStorageAccess(err) => {
                SigmaError::Storage(format!("unable to access secure storage: {err}"))
            }
            other => SigmaError::Storage(other.to_string()),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        Self(value.into_sigma())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SigmaError */
/* -------------------------------------------------------------------------- */

impl IntoSigmaError for HttpError {
    fn into_sigma(self) -> SigmaError {
        if self.is_timeout() {
            return SigmaError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SigmaError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return SigmaError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => SigmaError::Auth(message),
                404 => SigmaError::NotFound(message),
                400..=499 => SigmaError::InvalidInput(message),
                _ => SigmaError::Network(message),
            };
        }

        SigmaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_sigma())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let mapped: SigmaError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            SigmaError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn keyring_platform_failure_maps_to_storage() {
        let err = KeyringError::PlatformFailure("secret service unavailable".into());
        let mapped: SigmaError = InfraError::from(err).into();
        match mapped {
            SigmaError::Storage(msg) => assert!(msg.contains("secret service unavailable")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: SigmaError = InfraError::from(error).into();
        match mapped {
            SigmaError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}/")).send().await.unwrap_err();

        let mapped: SigmaError = InfraError::from(error).into();
        assert!(matches!(mapped, SigmaError::Network(_)));
    }
}
