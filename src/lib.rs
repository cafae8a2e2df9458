pub mod failure;
pub mod field;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod schema;


pub use failure::{
    FALLBACK_FAILURE_MESSAGE, FailureData, FailureDetail, RemoteFailure, display_message,
};
pub use field::{FieldKey, FieldValue, FormData, Message};
pub use pipeline::{BoxSubmitFuture, Outcome, SubmitPipeline};
pub use report::{ErrorReport, ErrorSink, SharedErrors};
pub use rules::{
    Email, Max, MaxLength, Min, MinLength, Numeric, Required, Rule, RuleSet, WellFormedUrl,
    email, max, max_length, min, min_length, number, required, url,
};
pub use schema::{FormSchema, Validate};
