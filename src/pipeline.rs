use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::failure::{FailureDetail, display_message};
use super::field::FormData;
use super::report::{ErrorReport, ErrorSink};
use super::schema::Validate;

pub type BoxSubmitFuture<R, E> =
    Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'static>>;

type MutationFn<P, R, E> = Arc<dyn Fn(P) -> BoxSubmitFuture<R, E> + Send + Sync>;
type PrepareFn<P> = Arc<dyn Fn(&FormData) -> P + Send + Sync>;

/// Outcome of one submit attempt that did not fail remotely. A
/// validation rejection is a normal return, never an error; a remote
/// failure travels back as the `Err` arm of `submit` instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<R> {
    Succeeded(R),
    Invalid(ErrorReport),
}

impl<R> Outcome<R> {
    pub fn succeeded(self) -> Option<R> {
        match self {
            Outcome::Succeeded(result) => Some(result),
            Outcome::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ErrorReport> {
        match self {
            Outcome::Succeeded(_) => None,
            Outcome::Invalid(report) => Some(report),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid(_))
    }
}

/// One pipeline per form: built once, reused for every attempt. The
/// pipeline holds no per-attempt state, so concurrent invocations are
/// the caller's concern (no debounce, no in-flight guard, no timeout).
pub struct SubmitPipeline<P, R, E> {
    mutation: MutationFn<P, R, E>,
    prepare: PrepareFn<P>,
    validate: Option<Arc<dyn Validate>>,
    on_success: Option<Arc<dyn Fn(&R) + Send + Sync>>,
    on_error: Option<Arc<dyn Fn(&E) + Send + Sync>>,
    errors: Option<Arc<dyn ErrorSink>>,
}

impl<P, R, E> Clone for SubmitPipeline<P, R, E> {
    fn clone(&self) -> Self {
        Self {
            mutation: self.mutation.clone(),
            prepare: self.prepare.clone(),
            validate: self.validate.clone(),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<R, E> SubmitPipeline<FormData, R, E> {
    /// Pipeline whose payload is the form data itself.
    pub fn new<F, Fut>(mutation: F) -> Self
    where
        F: Fn(FormData) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
    {
        Self::with_payload(mutation, FormData::clone)
    }
}

impl<P, R, E> SubmitPipeline<P, R, E> {
    /// Pipeline with an explicit form-to-payload step.
    pub fn with_payload<F, Fut, Pr>(mutation: F, prepare: Pr) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        Pr: Fn(&FormData) -> P + Send + Sync + 'static,
    {
        Self {
            mutation: Arc::new(move |payload| {
                let fut: BoxSubmitFuture<R, E> = Box::pin(mutation(payload));
                fut
            }),
            prepare: Arc::new(prepare),
            validate: None,
            on_success: None,
            on_error: None,
            errors: None,
        }
    }

    pub fn validate(mut self, validate: impl Validate + 'static) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn on_success(mut self, callback: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&E) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    pub fn errors(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.errors = Some(Arc::new(sink));
        self
    }

    /// Runs one attempt: clear the sink, validate, prepare, await the
    /// mutation, report. The mutation is never invoked while validation
    /// reports any error, and every attempt starts from an empty sink.
    pub async fn submit(&self, form: &FormData) -> Result<Outcome<R>, E>
    where
        E: FailureDetail,
    {
        if let Some(sink) = &self.errors {
            sink.set_errors(ErrorReport::new());
        }

        if let Some(validate) = &self.validate {
            let report = validate.validate(form);
            if !report.is_empty() {
                if let Some(sink) = &self.errors {
                    sink.set_errors(report.clone());
                }
                return Ok(Outcome::Invalid(report));
            }
        }

        let payload = (self.prepare)(form);
        match (self.mutation)(payload).await {
            Ok(result) => {
                if let Some(on_success) = &self.on_success {
                    on_success(&result);
                }
                Ok(Outcome::Succeeded(result))
            }
            Err(failure) => {
                if let Some(sink) = &self.errors {
                    sink.set_errors(ErrorReport::form(display_message(&failure)));
                }
                if let Some(on_error) = &self.on_error {
                    on_error(&failure);
                }
                Err(failure)
            }
        }
    }
}
