//! 消息驱动的搜索 worker
//!
//! 两个线程：
//! - dispatcher: 读取 `WorkerInput`，持有所有未结束搜索的取消句柄
//! - runner: 按到达顺序逐个执行搜索并转发事件
//!
//! Requests run to completion in arrival order; only an explicit `cancel`
//! message stops them. Every job's events reach the outbox contiguously,
//! including the `error` of a line that failed to decode.

use super::service::{BookSearchService, SearchTask};
use crate::kernel::services::ports::search::{
    InboundMessage, Result, SearchError, SearchEvent, SearchRequest,
};
use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::JoinHandle;

const EVENT_BUFFER: usize = 256;

/// What the host feeds into the worker.
#[derive(Debug)]
pub enum WorkerInput {
    Message(InboundMessage),
    /// A message that could not be decoded; answered with an `error` event
    /// in queue order.
    Malformed(SearchError),
}

impl From<InboundMessage> for WorkerInput {
    fn from(message: InboundMessage) -> Self {
        Self::Message(message)
    }
}

impl From<Result<InboundMessage>> for WorkerInput {
    fn from(decoded: Result<InboundMessage>) -> Self {
        match decoded {
            Ok(message) => Self::Message(message),
            Err(e) => Self::Malformed(e),
        }
    }
}

enum Job {
    Search(SearchTask, SearchRequest),
    Reject(SearchError),
}

pub struct SearchWorker {
    dispatcher: JoinHandle<()>,
    runner: JoinHandle<()>,
}

impl SearchWorker {
    pub fn spawn(
        service: BookSearchService,
        inbox: Receiver<WorkerInput>,
        outbox: SyncSender<SearchEvent>,
    ) -> io::Result<Self> {
        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>();

        let runner = std::thread::Builder::new()
            .name("epub-search-runner".to_string())
            .spawn(move || runner_loop(service, jobs_rx, outbox))?;

        let dispatcher = std::thread::Builder::new()
            .name("epub-search-dispatch".to_string())
            .spawn(move || dispatch_loop(inbox, jobs_tx))?;

        Ok(Self { dispatcher, runner })
    }

    /// Wait until the inbox is closed and every accepted job has finished.
    pub fn join(self) {
        if self.dispatcher.join().is_err() {
            tracing::error!("search dispatcher panicked");
        }
        if self.runner.join().is_err() {
            tracing::error!("search runner panicked");
        }
    }
}

fn dispatch_loop(inbox: Receiver<WorkerInput>, jobs: mpsc::Sender<Job>) {
    // 已提交但尚未结束的搜索
    let mut outstanding: Vec<SearchTask> = Vec::new();

    for input in inbox {
        let job = match input {
            WorkerInput::Message(InboundMessage::Cancel(_)) => {
                for task in outstanding.drain(..) {
                    tracing::debug!(search_id = task.id(), "cancel requested");
                    task.cancel();
                }
                continue;
            }
            WorkerInput::Message(InboundMessage::Search(request)) => {
                outstanding.retain(|task| !task.is_finished());
                let task = SearchTask::new();
                outstanding.push(task.clone());
                Job::Search(task, request)
            }
            WorkerInput::Malformed(e) => Job::Reject(e),
        };

        if jobs.send(job).is_err() {
            tracing::warn!("search runner stopped, dropping input");
            break;
        }
    }

    tracing::debug!("search inbox closed");
}

fn runner_loop(service: BookSearchService, jobs: Receiver<Job>, outbox: SyncSender<SearchEvent>) {
    for job in jobs {
        let (task, request) = match job {
            Job::Search(task, request) => (task, request),
            Job::Reject(e) => {
                tracing::warn!(error = %e, "rejected inbound message");
                if outbox.send(SearchEvent::error(&e)).is_err() {
                    tracing::warn!("search outbox closed");
                    return;
                }
                continue;
            }
        };

        let (tx, rx) = mpsc::sync_channel(EVENT_BUFFER);
        service.search_with_task(request, task.clone(), tx);

        // The sender is dropped once the search task ends, so a missing
        // terminal event cannot hang this loop.
        for event in rx {
            let terminal = event.is_terminal();
            if outbox.send(event).is_err() {
                tracing::warn!("search outbox closed");
                task.cancel();
                return;
            }
            if terminal {
                break;
            }
        }
        task.mark_finished();
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/worker.rs"]
mod tests;
