use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::{AttachmentKind, FrameKind, Report};
use kernel::KernelError;
use serde_json::json;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateBook,
    GetBook,
    UpdateBook,
    DeleteBook,
}

impl Operation {
    fn prefix(&self) -> &'static str {
        match self {
            Operation::CreateBook => "Error creating book",
            Operation::GetBook => "Error getting book",
            Operation::UpdateBook => "Error updating book",
            Operation::DeleteBook => "Error deleting book",
        }
    }
}

#[derive(Debug)]
pub struct ErrorStatus {
    operation: Operation,
    report: Report<KernelError>,
}

impl ErrorStatus {
    pub fn new(operation: Operation, report: Report<KernelError>) -> Self {
        Self { operation, report }
    }

    pub fn on(operation: Operation) -> impl FnOnce(Report<KernelError>) -> Self {
        move |report| Self::new(operation, report)
    }

    /// The request could not be read: bad json, a missing field or a malformed id.
    pub fn invalid(operation: Operation, reason: impl Into<String>) -> Self {
        let report = Report::new(KernelError::Validation).attach_printable(reason.into());
        Self::new(operation, report)
    }

    pub fn not_found(operation: Operation) -> Self {
        Self::new(operation, Report::new(KernelError::NotFound))
    }

    fn status(&self) -> StatusCode {
        match self.report.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            KernelError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self.report.current_context() {
            KernelError::NotFound => KernelError::NotFound.to_string(),
            KernelError::Validation => self
                .printable()
                .unwrap_or_else(|| KernelError::Validation.to_string()),
            KernelError::Timeout | KernelError::Internal => {
                format!("{}: {}", self.operation.prefix(), self.root_cause())
            }
        }
    }

    fn printable(&self) -> Option<String> {
        self.report.frames().find_map(|frame| match frame.kind() {
            FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                Some(printable.to_string())
            }
            _ => None,
        })
    }

    fn root_cause(&self) -> String {
        self.report
            .frames()
            .filter_map(|frame| match frame.kind() {
                FrameKind::Context(context) => Some(context.to_string()),
                _ => None,
            })
            .last()
            .unwrap_or_else(|| self.report.current_context().to_string())
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.report);
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
