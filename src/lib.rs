// cfn-sphere utility library
//
// Helpers shared by the CloudFormation orchestration tooling: document
// format conversion, API server time lookup and throttling-aware retries.

pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod logging;
pub mod remote;
pub mod retry;
pub mod server_time;

pub use convert::{convert_json_to_yaml_string, convert_yaml_to_json_string};
pub use error::{CfnSphereError, Result};
pub use remote::RemoteError;
pub use retry::{with_retry, RetryPolicy, Throttling};
pub use server_time::get_remote_time;
