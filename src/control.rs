use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::{Framed, LinesCodec};

use crate::workout_tracker::WorkoutTracker;

pub type RequestSender = mpsc::UnboundedSender<(Request, oneshot::Sender<String>)>;
pub type RequestReceiver = mpsc::UnboundedReceiver<(Request, oneshot::Sender<String>)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Status,
    Log(usize),
    Reset(String),
    Swap(usize, String),
    Complete,
    Abandon,
    Clear,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Request {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseError::Empty)?;
        match command {
            "status" => Ok(Request::Status),
            "log" => {
                let position = words
                    .next()
                    .and_then(|word| word.parse().ok())
                    .ok_or(ParseError::Usage("log <position>"))?;
                Ok(Request::Log(position))
            }
            "reset" => {
                let key = words.next().ok_or(ParseError::Usage("reset <key>"))?;
                Ok(Request::Reset(key.to_string()))
            }
            "swap" => {
                let position = words
                    .next()
                    .and_then(|word| word.parse().ok())
                    .ok_or(ParseError::Usage("swap <position> <name>"))?;
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(ParseError::Usage("swap <position> <name>"));
                }
                Ok(Request::Swap(position, name))
            }
            "complete" => Ok(Request::Complete),
            "abandon" => Ok(Request::Abandon),
            "clear" => Ok(Request::Clear),
            "quit" => Ok(Request::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Serialize)]
struct ExerciseStatus {
    position: usize,
    name: String,
    sets_logged: usize,
    sets_total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    rest_seconds: Option<u32>,
}

#[derive(Serialize)]
struct StatusReply {
    ok: bool,
    workout: String,
    location: String,
    completed: bool,
    exercises: Vec<ExerciseStatus>,
    timers: BTreeMap<String, u32>,
}

pub fn handle(tracker: &Arc<Mutex<WorkoutTracker>>, request: Request) -> String {
    let mut tracker = tracker.lock().unwrap();
    match request {
        Request::Status => status_reply(&tracker),
        Request::Log(position) => {
            if tracker.log_set(position) {
                ack()
            } else {
                error_reply("no open set at that position")
            }
        }
        Request::Reset(key) => {
            tracker.reset_rest(key);
            ack()
        }
        Request::Swap(position, name) => {
            if tracker.swap_exercise(position, name) {
                ack()
            } else {
                error_reply("no exercise at that position")
            }
        }
        Request::Complete => {
            tracker.complete();
            ack()
        }
        Request::Abandon => {
            tracker.abandon();
            ack()
        }
        Request::Clear => {
            tracker.clear_timers();
            ack()
        }
        Request::Quit => {
            tracker.exit = true;
            ack()
        }
    }
}

fn status_reply(tracker: &WorkoutTracker) -> String {
    let session = &tracker.session;
    let exercises = session
        .exercises
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            let key = session.timer_key(position);
            ExerciseStatus {
                position,
                name: entry.exercise.name.clone(),
                sets_logged: entry.sets_logged(),
                sets_total: entry.sets.len(),
                rest_seconds: key.and_then(|key| tracker.timers.remaining(&key)),
            }
        })
        .collect();

    let reply = StatusReply {
        ok: true,
        workout: session.workout_type.display_name().to_string(),
        location: session.location.display_name().to_string(),
        completed: session.completed,
        exercises,
        timers: tracker
            .timers
            .timers()
            .iter()
            .map(|(key, seconds)| (key.clone(), *seconds))
            .collect(),
    };
    serde_json::to_string(&reply).unwrap_or_else(|_| error_reply("status unavailable"))
}

fn ack() -> String {
    serde_json::json!({ "ok": true }).to_string()
}

fn error_reply(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

pub async fn serve(listener: UnixListener, requests: RequestSender) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let requests = requests.clone();
                tokio::spawn(async move {
                    client_loop(stream, requests).await;
                });
            }
            Err(err) => {
                // Transient failures (fd exhaustion and the like) must not
                // take the socket down while the session keeps running.
                tracing::warn!("control socket accept failed: {}", err);
            }
        }
    }
}

async fn client_loop(stream: UnixStream, requests: RequestSender) {
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(1024));
    while let Some(line) = framed.next().await {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::debug!("control connection dropped: {}", err);
                return;
            }
        };
        let reply = match Request::parse(&line) {
            Ok(request) => {
                let (reply_tx, reply_rx) = oneshot::channel();
                if requests.send((request, reply_tx)).is_err() {
                    return;
                }
                match reply_rx.await {
                    Ok(reply) => reply,
                    Err(_) => return,
                }
            }
            Err(err) => error_reply(&err.to_string()),
        };
        if framed.send(reply).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn tracker() -> Arc<Mutex<WorkoutTracker>> {
        Arc::new(Mutex::new(WorkoutTracker::new(None, Config::default())))
    }

    #[test]
    fn commands_parse_into_requests() {
        assert_eq!(Request::parse("status"), Ok(Request::Status));
        assert_eq!(Request::parse("log 2"), Ok(Request::Log(2)));
        assert_eq!(
            Request::parse("reset bench-press-1"),
            Ok(Request::Reset("bench-press-1".to_string()))
        );
        assert_eq!(
            Request::parse("swap 3 Incline Bench Press"),
            Ok(Request::Swap(3, "Incline Bench Press".to_string()))
        );
        assert_eq!(Request::parse("quit"), Ok(Request::Quit));
    }

    #[test]
    fn bad_commands_are_rejected() {
        assert_eq!(Request::parse(""), Err(ParseError::Empty));
        assert_eq!(
            Request::parse("log"),
            Err(ParseError::Usage("log <position>"))
        );
        assert_eq!(
            Request::parse("swap 2"),
            Err(ParseError::Usage("swap <position> <name>"))
        );
        assert_eq!(
            Request::parse("frobnicate"),
            Err(ParseError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn handle_reports_unknown_positions() {
        let tracker = tracker();
        let reply = handle(&tracker, Request::Log(17));
        assert!(reply.contains("\"ok\":false"));
    }

    #[test]
    fn status_lists_running_timers() {
        let tracker = tracker();
        handle(&tracker, Request::Log(1));

        let reply = handle(&tracker, Request::Status);
        assert!(reply.contains("\"ok\":true"));
        assert!(reply.contains("bench-press-1"));
        assert!(reply.contains("\"rest_seconds\":90"));
    }

    #[tokio::test]
    async fn socket_survives_across_connections() {
        let path = std::env::temp_dir().join(format!(
            "restbell-ctl-test-{}.sock",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let listener = UnixListener::bind(&path).unwrap();

        let (request_tx, mut request_rx) = mpsc::unbounded_channel();
        tokio::spawn(serve(listener, request_tx));
        let tracker = tracker();
        tokio::spawn(async move {
            while let Some((request, reply)) = request_rx.recv().await {
                let _ = reply.send(handle(&tracker, request));
            }
        });

        for _ in 0..2 {
            let stream = UnixStream::connect(&path).await.unwrap();
            let mut framed = Framed::new(stream, LinesCodec::new());
            framed.send("status".to_string()).await.unwrap();
            let reply = framed.next().await.unwrap().unwrap();
            assert!(reply.contains("\"ok\":true"));
        }

        let _ = std::fs::remove_file(&path);
    }
}
