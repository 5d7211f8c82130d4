pub mod audit_service;
pub mod csv_codec_service;
pub mod engine_service;
pub mod metrics_service;
pub mod resample_service;
pub mod token_service;
pub mod validation_service;
