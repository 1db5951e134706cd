use super::*;
use crate::kernel::services::ports::search::Chapter;
use crate::kernel::services::ports::SearchConfig;
use std::time::Duration;

fn create_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

fn start(rt: &tokio::runtime::Runtime) -> (mpsc::Sender<WorkerInput>, Receiver<SearchEvent>, SearchWorker) {
    let service = BookSearchService::new(rt.handle().clone(), SearchConfig::default());
    let (inbox_tx, inbox_rx) = mpsc::channel();
    let (outbox_tx, outbox_rx) = mpsc::sync_channel(1024);
    let worker = SearchWorker::spawn(service, inbox_rx, outbox_tx).unwrap();
    (inbox_tx, outbox_rx, worker)
}

fn recv_until_done(rx: &Receiver<SearchEvent>, dones: usize) -> Vec<SearchEvent> {
    let mut events = Vec::new();
    let mut seen = 0;
    while seen < dones {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(event) => {
                if event.is_terminal() {
                    seen += 1;
                }
                events.push(event);
            }
            Err(_) => panic!("Timeout waiting for worker events"),
        }
    }
    events
}

#[test]
fn test_worker_runs_request() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    let request = SearchRequest::new(vec![Chapter::new("c1", "Ch1", "one cat")], "cat");
    inbox.send(InboundMessage::Search(request).into()).unwrap();

    let events = recv_until_done(&outbox, 1);
    assert_eq!(events.last(), Some(&SearchEvent::Done));
    assert!(events
        .iter()
        .any(|e| matches!(e, SearchEvent::Result { results } if results.len() == 1)));

    drop(inbox);
    worker.join();
}

#[test]
fn test_worker_reports_invalid_request() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    inbox
        .send(InboundMessage::Search(SearchRequest::default()).into())
        .unwrap();

    let events = recv_until_done(&outbox, 1);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], SearchEvent::Error { .. }));

    drop(inbox);
    worker.join();
}

fn result_sizes(events: &[SearchEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            SearchEvent::Result { results } => Some(results.len()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_queued_requests_run_to_completion() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    // one match per chapter, far enough apart to survive the document-wide dedup
    let first = (0..300)
        .map(|i| Chapter::new(format!("c{}", i), "Ch", format!("{}cat", " ".repeat(i * 6))))
        .collect();
    inbox
        .send(InboundMessage::Search(SearchRequest::new(first, "cat")).into())
        .unwrap();
    inbox
        .send(
            InboundMessage::Search(SearchRequest::new(
                vec![Chapter::new("x", "X", "a cat")],
                "cat",
            ))
            .into(),
        )
        .unwrap();

    let events = recv_until_done(&outbox, 2);
    assert_eq!(result_sizes(&events), vec![100, 1]);
    assert!(!events.iter().any(|e| matches!(e, SearchEvent::Error { .. })));

    drop(inbox);
    worker.join();
}

#[test]
fn test_malformed_input_waits_for_running_search() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    let chapters = (0..500)
        .map(|i| Chapter::new(format!("c{}", i), "Ch", "filler text ".repeat(50)))
        .collect();
    inbox
        .send(InboundMessage::Search(SearchRequest::new(chapters, "nothing")).into())
        .unwrap();
    inbox
        .send(WorkerInput::from(crate::kernel::services::adapters::decode_inbound(
            "garbage",
        )))
        .unwrap();

    let events = recv_until_done(&outbox, 2);
    let done_at = events.iter().position(|e| *e == SearchEvent::Done).unwrap();
    let error_at = events
        .iter()
        .position(|e| matches!(e, SearchEvent::Error { .. }))
        .unwrap();
    assert_eq!(error_at, done_at + 1);
    assert_eq!(error_at, events.len() - 1);

    drop(inbox);
    worker.join();
}

#[test]
fn test_cancel_message_ends_with_done() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    let chapters = (0..500)
        .map(|i| Chapter::new(format!("c{}", i), "Ch", "cat ".repeat(200)))
        .collect();
    inbox
        .send(InboundMessage::Search(SearchRequest::new(chapters, "cat")).into())
        .unwrap();
    inbox.send(InboundMessage::cancel().into()).unwrap();

    let events = recv_until_done(&outbox, 1);
    assert_eq!(events.last(), Some(&SearchEvent::Done));
    assert!(!events.iter().any(|e| matches!(e, SearchEvent::Error { .. })));

    drop(inbox);
    worker.join();
}

#[test]
fn test_cancel_reaches_queued_requests() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    let chapters = (0..500)
        .map(|i| Chapter::new(format!("c{}", i), "Ch", "cat ".repeat(200)))
        .collect();
    inbox
        .send(InboundMessage::Search(SearchRequest::new(chapters, "cat")).into())
        .unwrap();
    inbox
        .send(
            InboundMessage::Search(SearchRequest::new(
                vec![Chapter::new("x", "X", "a cat")],
                "cat",
            ))
            .into(),
        )
        .unwrap();
    inbox.send(InboundMessage::cancel().into()).unwrap();

    let events = recv_until_done(&outbox, 2);
    assert_eq!(events.last(), Some(&SearchEvent::Done));
    assert_eq!(result_sizes(&events).last(), Some(&0));

    drop(inbox);
    worker.join();
}

#[test]
fn test_closed_inbox_finishes_pending_search() {
    let rt = create_runtime();
    let (inbox, outbox, worker) = start(&rt);

    inbox
        .send(
            InboundMessage::Search(SearchRequest::new(
                vec![Chapter::new("c1", "Ch1", "cat")],
                "cat",
            ))
            .into(),
        )
        .unwrap();
    drop(inbox);
    worker.join();

    let events: Vec<SearchEvent> = outbox.try_iter().collect();
    assert_eq!(events.last(), Some(&SearchEvent::Done));
}
