//! Google Cloud authentication

mod adc;

pub use adc::{
    discover, AdcTokenProvider, AuthError, ServiceAccountKey, CREDENTIALS_FILE_ENV,
    METADATA_HOST_ENV,
};
