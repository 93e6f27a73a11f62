// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Adapters between Google Cloud long-running operations and the poller.

use google_cloud_gax as gax;
use google_cloud_longrunning as longrunning;
use google_cloud_wkt as wkt;
use lro::OperationStatus;

/// The error reported by a long-running operation that completed with a
/// failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("operation failed with code {code}: {message}")]
pub struct OperationError {
    pub code: i32,
    pub message: String,
}

/// Maps a Google Cloud long-running operation to an [OperationStatus].
///
/// * Operations that are not done are `Running`.
/// * Done operations with a response are `Succeeded`, if the response
///   decodes as `T`.
/// * Done operations with an error, or without any result, are `Failed`.
pub fn operation_status<T>(operation: &longrunning::model::Operation) -> lro::Result<OperationStatus<T>>
where
    T: wkt::message::Message + serde::de::DeserializeOwned,
{
    use longrunning::model::operation::Result as OperationResult;
    if !operation.done {
        return Ok(OperationStatus::Running);
    }
    match &operation.result {
        Some(OperationResult::Response(any)) => {
            let response = any.to_msg::<T>().map_err(lro::Error::other)?;
            Ok(OperationStatus::Succeeded(response))
        }
        Some(OperationResult::Error(status)) => Ok(OperationStatus::failed(OperationError {
            code: status.code,
            message: status.message.clone(),
        })),
        None => Ok(OperationStatus::failed(format!(
            "operation {} completed without a result",
            operation.name
        ))),
        Some(r) => Err(lro::Error::other(format!(
            "unexpected result branch {r:?} in operation {}",
            operation.name
        ))),
    }
}

/// Maps a client library error to the error kinds used by the poller.
///
/// * `NOT_FOUND` (or HTTP 404) becomes [NotFound][lro::ErrorKind::NotFound].
/// * I/O errors, timeouts, `UNAVAILABLE` (or HTTP 503), and transient
///   authentication errors become [Transport][lro::ErrorKind::Transport].
/// * Anything else becomes [Other][lro::ErrorKind::Other].
pub fn classify(error: gax::error::Error) -> lro::Error {
    use gax::error::rpc::Code;
    let code = error.status().map(|s| s.code);
    let http = error.http_status_code();
    if code == Some(Code::NotFound) || (code.is_none() && http == Some(404)) {
        return lro::Error::not_found(error);
    }
    if code == Some(Code::Unavailable)
        || (code.is_none() && http == Some(503))
        || error.is_io()
        || error.is_timeout()
        || is_transient_authentication(&error)
    {
        return lro::Error::transport(error);
    }
    lro::Error::other(error)
}

fn is_transient_authentication(error: &gax::error::Error) -> bool {
    use std::error::Error as _;
    error.is_authentication()
        && error
            .source()
            .and_then(|e| e.downcast_ref::<gax::error::CredentialsError>())
            .is_some_and(|e| e.is_transient())
}

/// Waits for the Google Cloud long-running operation called `name`.
///
/// The `fetch` closure typically calls `get_operation()` on a client.
///
/// # Example
/// ```no_run
/// # use cloud_snippets::polling::wait_for_operation;
/// # use google_cloud_apikeys_v2 as apikeys;
/// # async fn sample(client: &apikeys::client::ApiKeys, name: String) -> cloud_snippets::Result<()> {
/// let key = wait_for_operation::<apikeys::model::Key, _, _>(
///     lro::PollingOptions::default(),
///     name,
///     |name| async move { client.get_operation().set_name(name).send().await },
/// ).await?;
/// println!("{key:?}");
/// # Ok(()) }
/// ```
pub async fn wait_for_operation<T, F, Fut>(
    options: lro::PollingOptions,
    name: String,
    mut fetch: F,
) -> crate::Result<T>
where
    T: wkt::message::Message + serde::de::DeserializeOwned + Send,
    F: FnMut(String) -> Fut + Send,
    Fut: Future<Output = gax::Result<longrunning::model::Operation>> + Send,
{
    let fetch = move |name: String| {
        let pending = fetch(name);
        async move {
            let operation = pending.await.map_err(classify)?;
            operation_status::<T>(&operation)
        }
    };
    let response = lro::poll_until_terminal(options, name, fetch).await?;
    Ok(response)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use gax::error::rpc::{Code, Status};
    use longrunning::model::Operation;
    use longrunning::model::operation::Result as OperationResult;

    pub(crate) fn service_error(code: Code) -> gax::error::Error {
        gax::error::Error::service(Status::default().set_code(code).set_message("test-only"))
    }

    pub(crate) fn done_with_response<T: wkt::message::Message + serde::ser::Serialize>(
        name: &str,
        response: &T,
    ) -> Operation {
        let any = wkt::Any::from_msg(response).expect("test message should succeed");
        Operation::new()
            .set_name(name)
            .set_done(true)
            .set_result(OperationResult::Response(any.into()))
    }

    pub(crate) fn done_with_error(name: &str, code: i32, message: &str) -> Operation {
        let status = google_cloud_rpc::model::Status::default()
            .set_code(code)
            .set_message(message);
        Operation::new()
            .set_name(name)
            .set_done(true)
            .set_result(OperationResult::Error(status.into()))
    }

    #[test]
    fn status_running() -> anyhow::Result<()> {
        let op = Operation::new().set_name("operations/123");
        let got = operation_status::<wkt::Duration>(&op)?;
        assert!(matches!(got, OperationStatus::Running), "{got:?}");

        // Metadata-only operations are still running.
        let metadata = wkt::Any::from_msg(&wkt::Timestamp::clamp(123, 0))?;
        let op = Operation::new().set_metadata(metadata);
        let got = operation_status::<wkt::Duration>(&op)?;
        assert!(matches!(got, OperationStatus::Running), "{got:?}");
        Ok(())
    }

    #[test]
    fn status_succeeded() -> anyhow::Result<()> {
        let op = done_with_response("operations/123", &wkt::Duration::clamp(23, 0));
        let got = operation_status::<wkt::Duration>(&op)?;
        assert!(
            matches!(got, OperationStatus::Succeeded(ref d) if *d == wkt::Duration::clamp(23, 0)),
            "{got:?}"
        );
        Ok(())
    }

    #[test]
    fn status_failed() -> anyhow::Result<()> {
        let op = done_with_error("operations/123", Code::PermissionDenied as i32, "uh-oh");
        let got = operation_status::<wkt::Duration>(&op)?;
        let OperationStatus::Failed(error) = got else {
            panic!("expected a failed status, got={got:?}");
        };
        let got = error.downcast_ref::<OperationError>();
        assert_eq!(
            got,
            Some(&OperationError {
                code: Code::PermissionDenied as i32,
                message: "uh-oh".into()
            })
        );
        assert!(error.source().is_none());
        Ok(())
    }

    #[test]
    fn status_done_without_result() -> anyhow::Result<()> {
        let op = Operation::new().set_name("operations/123").set_done(true);
        let got = operation_status::<wkt::Duration>(&op)?;
        assert!(matches!(got, OperationStatus::Failed(_)), "{got:?}");
        Ok(())
    }

    #[test]
    fn status_wrong_type() {
        let op = done_with_response("operations/123", &wkt::Timestamp::clamp(123, 0));
        let got = operation_status::<wkt::Duration>(&op);
        assert!(
            matches!(got, Err(ref e) if e.kind() == lro::ErrorKind::Other),
            "{got:?}"
        );
    }

    #[test_case::test_case(Code::NotFound, lro::ErrorKind::NotFound)]
    #[test_case::test_case(Code::Unavailable, lro::ErrorKind::Transport)]
    #[test_case::test_case(Code::PermissionDenied, lro::ErrorKind::Other)]
    #[test_case::test_case(Code::InvalidArgument, lro::ErrorKind::Other)]
    #[test_case::test_case(Code::Aborted, lro::ErrorKind::Other)]
    fn classify_service(code: Code, want: lro::ErrorKind) {
        let got = classify(service_error(code));
        assert_eq!(got.kind(), want, "{got:?}");
    }

    #[test]
    fn classify_io() {
        let got = classify(gax::error::Error::io("connection reset"));
        assert!(got.is_transport(), "{got:?}");
        let got = classify(gax::error::Error::timeout("deadline exceeded"));
        assert!(got.is_transport(), "{got:?}");
    }

    #[test]
    fn classify_authentication() {
        use gax::error::CredentialsError;
        let got = classify(gax::error::Error::authentication(
            CredentialsError::from_msg(true, "try again"),
        ));
        assert!(got.is_transport(), "{got:?}");
        let got = classify(gax::error::Error::authentication(
            CredentialsError::from_msg(false, "bad credentials"),
        ));
        assert_eq!(got.kind(), lro::ErrorKind::Other, "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_operation_success() -> anyhow::Result<()> {
        let mut count = 0;
        let fetch = move |name: String| {
            count += 1;
            let response = match count {
                1 => Err(service_error(Code::Unavailable)),
                2 => Ok(Operation::new().set_name(&name)),
                _ => Ok(done_with_response(&name, &wkt::Duration::clamp(5, 0))),
            };
            async move { response }
        };
        let got = wait_for_operation::<wkt::Duration, _, _>(
            lro::PollingOptions::default(),
            "operations/123".to_string(),
            fetch,
        )
        .await?;
        assert_eq!(got, wkt::Duration::clamp(5, 0));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_operation_not_found() {
        let fetch = |_: String| async { Err::<Operation, _>(service_error(Code::NotFound)) };
        let got = wait_for_operation::<wkt::Duration, _, _>(
            lro::PollingOptions::default(),
            "operations/missing".to_string(),
            fetch,
        )
        .await;
        let is_not_found = got
            .as_ref()
            .err()
            .and_then(|e| e.as_polling())
            .map(|e| e.is_not_found());
        assert_eq!(is_not_found, Some(true), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_operation_failed() {
        let fetch = |name: String| async move {
            Ok::<_, gax::error::Error>(done_with_error(
                &name,
                Code::ResourceExhausted as i32,
                "quota",
            ))
        };
        let got = wait_for_operation::<wkt::Duration, _, _>(
            lro::PollingOptions::default(),
            "operations/123".to_string(),
            fetch,
        )
        .await;
        let failed = got
            .as_ref()
            .err()
            .and_then(|e| e.as_polling())
            .map(|e| e.is_operation_failed());
        assert_eq!(failed, Some(true), "{got:?}");
    }
}
