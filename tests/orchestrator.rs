#![allow(clippy::unwrap_used)]
//! Stream orchestration against a scripted transport.

mod common;

use std::pin::pin;
use std::time::Duration;

use futures_util::StreamExt;

use common::{ScriptedTransport, Step, chunk, config, delta_line};
use quicklingo::translation::{
    CancelTrigger, CancellationHandle, ErrorKind, Progress, StreamOrchestrator,
    TranslationOutcome, TranslationRequest,
};

fn partial(text: &str) -> Progress {
    Progress::Partial(text.to_string())
}

fn success(text: &str) -> Progress {
    Progress::Finished(TranslationOutcome::Success(text.to_string()))
}

async fn run(transport: &ScriptedTransport, streaming: bool, timeout: Duration) -> Vec<Progress> {
    let request = TranslationRequest::build("hello", &config(streaming)).unwrap();
    let handle = CancellationHandle::new(CancelTrigger::new(), timeout);
    let orchestrator = StreamOrchestrator::new(transport);
    orchestrator.execute(&request, &handle).collect().await
}

#[tokio::test(start_paused = true)]
async fn test_partials_are_cumulative() {
    let transport = ScriptedTransport::new(vec![
        Step::Chunk(delta_line("The ")),
        Step::Chunk(delta_line("quick ")),
        Step::Chunk(delta_line("fox")),
        chunk("data: [DONE]\n"),
    ]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(
        items,
        vec![
            partial("The "),
            partial("The quick "),
            partial("The quick fox"),
            success("The quick fox"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_data_after_sentinel_is_discarded() {
    let transport = ScriptedTransport::new(vec![
        Step::Chunk(format!("{}data: [DONE]\n{}", delta_line("a"), delta_line("late"))),
        Step::Chunk(delta_line("later")),
    ]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(items, vec![partial("a"), success("a")]);
}

#[tokio::test(start_paused = true)]
async fn test_end_of_stream_without_sentinel_flushes_tail() {
    let line = delta_line("tail");
    let transport = ScriptedTransport::new(vec![
        Step::Chunk(delta_line("head ")),
        Step::Chunk(line.trim_end().to_string()),
    ]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(
        items,
        vec![partial("head "), partial("head tail"), success("head tail")]
    );
}

#[tokio::test(start_paused = true)]
async fn test_malformed_lines_do_not_abort() {
    let transport = ScriptedTransport::new(vec![
        Step::Chunk(delta_line("one")),
        chunk("data: {\"choices\": [oops\n"),
        Step::Chunk(delta_line(" two")),
        chunk("data: [DONE]\n"),
    ]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(
        items,
        vec![partial("one"), partial("one two"), success("one two")]
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_stream_succeeds_with_empty_text() {
    let transport = ScriptedTransport::new(vec![chunk("data: [DONE]\n")]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(items, vec![success("")]);
}

#[tokio::test(start_paused = true)]
async fn test_stream_error_fails_with_network_kind() {
    let transport = ScriptedTransport::new(vec![
        Step::Chunk(delta_line("partial")),
        Step::Fail("connection reset".to_string()),
        Step::Chunk(delta_line(" never")),
    ]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], partial("partial"));
    let Progress::Finished(outcome) = &items[1] else {
        panic!("expected a terminal outcome, got {:?}", items[1]);
    };
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
}

#[tokio::test(start_paused = true)]
async fn test_connect_failure() {
    let transport = ScriptedTransport::refusing("connection refused");

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(items.len(), 1);
    let Progress::Finished(TranslationOutcome::Failed { kind, message }) = &items[0] else {
        panic!("expected a failure, got {:?}", items[0]);
    };
    assert_eq!(*kind, ErrorKind::Network);
    assert!(message.contains("connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_during_stream_times_out() {
    let transport = ScriptedTransport::new(vec![Step::Chunk(delta_line("slow")), Step::Hang]);

    let items = run(&transport, true, Duration::from_secs(60)).await;

    assert_eq!(
        items,
        vec![
            partial("slow"),
            Progress::Finished(TranslationOutcome::TimedOut)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_user_cancel_during_stream() {
    let transport = ScriptedTransport::new(vec![Step::Chunk(delta_line("first")), Step::Hang]);
    let request = TranslationRequest::build("hello", &config(true)).unwrap();
    let trigger = CancelTrigger::new();
    let handle = CancellationHandle::new(trigger.clone(), Duration::from_secs(60));
    let orchestrator = StreamOrchestrator::new(&transport);
    let mut progress = pin!(orchestrator.execute(&request, &handle));

    assert_eq!(progress.next().await, Some(partial("first")));

    trigger.cancel();

    assert_eq!(
        progress.next().await,
        Some(Progress::Finished(TranslationOutcome::Cancelled))
    );
    assert_eq!(progress.next().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_takes_precedence_over_user_cancel() {
    let transport = ScriptedTransport::new(vec![Step::Chunk(delta_line("first")), Step::Hang]);
    let request = TranslationRequest::build("hello", &config(true)).unwrap();
    let trigger = CancelTrigger::new();
    let handle = CancellationHandle::new(trigger.clone(), Duration::from_secs(5));
    let orchestrator = StreamOrchestrator::new(&transport);
    let mut progress = pin!(orchestrator.execute(&request, &handle));

    assert_eq!(progress.next().await, Some(partial("first")));

    // Both sources are set before the orchestrator observes the abort
    trigger.cancel();
    tokio::time::advance(Duration::from_secs(10)).await;

    assert_eq!(
        progress.next().await,
        Some(Progress::Finished(TranslationOutcome::TimedOut))
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_connecting() {
    let transport = ScriptedTransport::new(vec![Step::Chunk(delta_line("x"))])
        .with_connect_delay(Duration::from_secs(30));

    let items = run(&transport, true, Duration::from_secs(10)).await;

    assert_eq!(items, vec![Progress::Finished(TranslationOutcome::TimedOut)]);
}

#[tokio::test(start_paused = true)]
async fn test_non_streaming_response() {
    let transport = ScriptedTransport::new(vec![
        chunk("{\"choices\":[{\"message\":"),
        chunk("{\"content\":\"你好\"}}]}"),
    ]);

    let items = run(&transport, false, Duration::from_secs(60)).await;

    assert_eq!(items, vec![success("你好")]);
    assert!(!transport.last_request().unwrap().streaming());
}

#[tokio::test(start_paused = true)]
async fn test_non_streaming_without_content() {
    let transport = ScriptedTransport::new(vec![chunk("{\"choices\":[{\"message\":{}}]}")]);

    let items = run(&transport, false, Duration::from_secs(60)).await;

    assert_eq!(items, vec![success("")]);
}

#[tokio::test(start_paused = true)]
async fn test_non_streaming_malformed_body() {
    let transport = ScriptedTransport::new(vec![chunk("upstream timeout")]);

    let items = run(&transport, false, Duration::from_secs(60)).await;

    assert_eq!(items.len(), 1);
    let Progress::Finished(outcome) = &items[0] else {
        panic!("expected a terminal outcome");
    };
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
}

#[tokio::test(start_paused = true)]
async fn test_non_streaming_deadline() {
    let transport = ScriptedTransport::new(vec![chunk("{\"choices\":"), Step::Hang]);

    let items = run(&transport, false, Duration::from_secs(60)).await;

    assert_eq!(items, vec![Progress::Finished(TranslationOutcome::TimedOut)]);
}
