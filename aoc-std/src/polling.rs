use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tracing::{error, info, warn};

use crate::{errors::FetchError, requests::Fetch};

/// Pause between attempts while the resource answers 404.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// Source of "now" and of blocking sleeps for the poll loop.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A single poll. The deadline is fixed when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub wait_for_readiness: bool,
    pub deadline: Option<Instant>,
}

impl FetchRequest {
    #[must_use]
    pub fn new(
        url: String,
        wait_for_readiness: bool,
        timeout: Option<Duration>,
        clock: &impl Clock,
    ) -> FetchRequest {
        // a deadline past the end of `Instant` is never reached
        let deadline = timeout.and_then(|timeout| clock.now().checked_add(timeout));
        FetchRequest {
            url,
            wait_for_readiness,
            deadline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready(String),
    GaveUpNotReady,
    TimedOut,
    Failed(FetchError),
}

impl PollOutcome {
    /// # Errors
    ///
    /// Returns `Err` for every outcome other than `Ready`.
    pub fn into_result(self) -> Result<String, FetchError> {
        match self {
            PollOutcome::Ready(body) => Ok(body),
            PollOutcome::GaveUpNotReady => Err(FetchError::NotReady {}),
            PollOutcome::TimedOut => Err(FetchError::TimedOut {}),
            PollOutcome::Failed(err) => Err(err),
        }
    }
}

/// Requests `request.url` until it stops answering 404.
///
/// Only a 404 is retried. Any other non-2xx status or a transport error ends
/// the poll with [`PollOutcome::Failed`]. The deadline is checked only after
/// an attempt, so an already expired deadline still gets one request.
pub fn poll_until_ready(
    fetcher: &impl Fetch,
    clock: &impl Clock,
    request: &FetchRequest,
    label: &str,
) -> PollOutcome {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        info!(attempt, "Fetching {label}");

        let res = match fetcher.fetch(&request.url) {
            Ok(res) => res,
            Err(err) => return PollOutcome::Failed(err),
        };

        if res.status.is_success() {
            info!(attempt, "Retrieved {label}");
            return PollOutcome::Ready(res.body);
        }

        if res.status != StatusCode::NOT_FOUND {
            return PollOutcome::Failed(FetchError::HttpStatus {
                url: request.url.clone(),
                status: res.status.as_u16(),
            });
        }

        if !request.wait_for_readiness {
            error!("{label} not ready (404). Exiting because --wait flag is not set.");
            return PollOutcome::GaveUpNotReady;
        }

        let delay = match request.deadline {
            Some(deadline) => {
                let now = clock.now();
                if now >= deadline {
                    error!(attempt, "Timeout exceeded. Please try again later.");
                    return PollOutcome::TimedOut;
                }
                RETRY_INTERVAL.min(deadline.saturating_duration_since(now))
            }
            None => RETRY_INTERVAL,
        };

        if !delay.is_zero() {
            warn!("{label} not ready (404). Retrying in {delay:?}...");
            clock.sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        time::{Duration, Instant},
    };

    use claims::assert_matches;
    use reqwest::StatusCode;

    use super::{
        poll_until_ready, Clock, FetchRequest, PollOutcome, SystemClock, RETRY_INTERVAL,
    };
    use crate::{
        errors::FetchError, requests::Fetch, settings::timeout_to_duration, types::FetchResponse,
    };

    /// Virtual time: sleeping advances `now` instead of blocking.
    struct FakeClock {
        start: Instant,
        elapsed: Cell<Duration>,
        sleeps: RefCell<Vec<Duration>>,
    }

    impl FakeClock {
        fn new() -> FakeClock {
            FakeClock {
                start: Instant::now(),
                elapsed: Cell::new(Duration::ZERO),
                sleeps: RefCell::new(vec![]),
            }
        }

        fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.borrow().clone()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.start + self.elapsed.get()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.elapsed.set(self.elapsed.get() + duration);
        }
    }

    /// Replays canned responses; the last one repeats forever.
    struct ScriptedFetcher {
        script: RefCell<VecDeque<Result<FetchResponse, FetchError>>>,
        attempts: Cell<u32>,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<FetchResponse, FetchError>>) -> ScriptedFetcher {
            ScriptedFetcher {
                script: RefCell::new(script.into()),
                attempts: Cell::new(0),
            }
        }

        fn always(status: StatusCode) -> ScriptedFetcher {
            ScriptedFetcher::new(vec![Ok(FetchResponse::new(status, ""))])
        }

        fn attempts(&self) -> u32 {
            self.attempts.get()
        }
    }

    impl Fetch for ScriptedFetcher {
        fn fetch(&self, _url: &str) -> Result<FetchResponse, FetchError> {
            self.attempts.set(self.attempts.get() + 1);
            let mut script = self.script.borrow_mut();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            }
        }
    }

    fn not_found() -> Result<FetchResponse, FetchError> {
        Ok(FetchResponse::new(StatusCode::NOT_FOUND, "Not Found"))
    }

    fn request(clock: &FakeClock, wait: bool, timeout: Option<Duration>) -> FetchRequest {
        FetchRequest::new(
            "https://adventofcode.com/2023/day/5/input".to_string(),
            wait,
            timeout,
            clock,
        )
    }

    #[test]
    fn a_ready_resource_is_returned_on_the_first_attempt() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::new(vec![Ok(FetchResponse::new(StatusCode::OK, "DATA"))]);

        let outcome = poll_until_ready(&fetcher, &clock, &request(&clock, true, None), "input");

        assert_eq!(outcome, PollOutcome::Ready("DATA".to_string()));
        assert_eq!(fetcher.attempts(), 1);
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn not_waiting_gives_up_after_exactly_one_attempt() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::always(StatusCode::NOT_FOUND);

        let outcome = poll_until_ready(&fetcher, &clock, &request(&clock, false, None), "input");

        assert_eq!(outcome, PollOutcome::GaveUpNotReady);
        assert_eq!(fetcher.attempts(), 1);
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn not_waiting_ignores_a_generous_deadline() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::always(StatusCode::NOT_FOUND);
        let req = request(&clock, false, Some(Duration::from_secs(3600)));

        assert_eq!(poll_until_ready(&fetcher, &clock, &req, "input"), PollOutcome::GaveUpNotReady);
        assert_eq!(fetcher.attempts(), 1);
    }

    #[test]
    fn an_expired_deadline_still_makes_one_attempt() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::always(StatusCode::NOT_FOUND);
        let req = request(&clock, true, Some(Duration::ZERO));

        let outcome = poll_until_ready(&fetcher, &clock, &req, "input");

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(fetcher.attempts(), 1);
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn an_expired_deadline_does_not_hide_a_ready_resource() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::new(vec![Ok(FetchResponse::new(StatusCode::OK, "DATA"))]);
        let req = request(&clock, true, Some(Duration::ZERO));

        assert_eq!(
            poll_until_ready(&fetcher, &clock, &req, "input"),
            PollOutcome::Ready("DATA".to_string())
        );
    }

    #[test]
    fn without_a_deadline_it_retries_at_the_fixed_interval() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::new(vec![
            not_found(),
            not_found(),
            Ok(FetchResponse::new(StatusCode::OK, "DATA")),
        ]);

        let outcome = poll_until_ready(&fetcher, &clock, &request(&clock, true, None), "input");

        assert_eq!(outcome, PollOutcome::Ready("DATA".to_string()));
        assert_eq!(fetcher.attempts(), 3);
        assert_eq!(clock.sleeps(), vec![RETRY_INTERVAL, RETRY_INTERVAL]);
    }

    #[test]
    fn the_last_sleep_is_shortened_to_the_deadline() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::always(StatusCode::NOT_FOUND);
        let req = request(&clock, true, Some(Duration::from_secs(7)));

        let outcome = poll_until_ready(&fetcher, &clock, &req, "input");

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(
            clock.sleeps(),
            vec![RETRY_INTERVAL, RETRY_INTERVAL, Duration::from_secs(1)]
        );
        assert_eq!(fetcher.attempts(), 4);
    }

    #[test]
    fn the_deadline_is_fixed_when_the_request_is_built() {
        let clock = FakeClock::new();
        let req = request(&clock, true, Some(Duration::from_secs(10)));
        clock.sleep(Duration::from_secs(9));

        let fetcher = ScriptedFetcher::always(StatusCode::NOT_FOUND);
        let outcome = poll_until_ready(&fetcher, &clock, &req, "input");

        assert_eq!(outcome, PollOutcome::TimedOut);
        // the 9s pre-sleep plus a single 1s retry
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(9), Duration::from_secs(1)]);
        assert_eq!(fetcher.attempts(), 2);
    }

    #[test]
    fn server_errors_fail_immediately() {
        for wait in [true, false] {
            let clock = FakeClock::new();
            let fetcher = ScriptedFetcher::new(vec![
                Ok(FetchResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "")),
                Ok(FetchResponse::new(StatusCode::OK, "DATA")),
            ]);
            let req = request(&clock, wait, Some(Duration::from_secs(3600)));

            let outcome = poll_until_ready(&fetcher, &clock, &req, "input");

            assert_matches!(
                outcome,
                PollOutcome::Failed(FetchError::HttpStatus { status: 500, .. })
            );
            assert_eq!(fetcher.attempts(), 1);
            assert!(clock.sleeps().is_empty());
        }
    }

    #[test]
    fn a_failure_after_retries_is_not_retried() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::new(vec![
            not_found(),
            Ok(FetchResponse::new(StatusCode::BAD_REQUEST, "Puzzle inputs differ by user.")),
            Ok(FetchResponse::new(StatusCode::OK, "DATA")),
        ]);

        let outcome = poll_until_ready(&fetcher, &clock, &request(&clock, true, None), "input");

        assert_matches!(outcome, PollOutcome::Failed(FetchError::HttpStatus { status: 400, .. }));
        assert_eq!(fetcher.attempts(), 2);
        assert_eq!(clock.sleeps(), vec![RETRY_INTERVAL]);
    }

    #[test]
    fn transport_errors_fail_immediately() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::new(vec![Err(FetchError::Transport {
            url: "https://adventofcode.com/2023/day/5/input".to_string(),
            reason: "connection refused".to_string(),
        })]);

        let outcome = poll_until_ready(&fetcher, &clock, &request(&clock, true, None), "input");

        assert_matches!(outcome, PollOutcome::Failed(FetchError::Transport { .. }));
        assert_eq!(fetcher.attempts(), 1);
    }

    #[test]
    fn an_unrepresentable_deadline_means_no_deadline() {
        let clock = FakeClock::new();
        let req = request(&clock, true, Some(Duration::MAX));
        assert_eq!(req.deadline, None);

        let req = FetchRequest::new(
            "https://adventofcode.com/2023/day/5/input".to_string(),
            true,
            Some(timeout_to_duration(i64::MAX)),
            &SystemClock,
        );
        assert_eq!(req.deadline, None);
    }

    #[test]
    fn a_huge_timeout_keeps_retrying_until_ready() {
        let clock = FakeClock::new();
        let fetcher = ScriptedFetcher::new(vec![
            not_found(),
            Ok(FetchResponse::new(StatusCode::OK, "DATA")),
        ]);
        let req = request(&clock, true, Some(Duration::MAX));

        let outcome = poll_until_ready(&fetcher, &clock, &req, "input");

        assert_eq!(outcome, PollOutcome::Ready("DATA".to_string()));
        assert_eq!(clock.sleeps(), vec![RETRY_INTERVAL]);
    }

    #[test]
    fn outcomes_map_onto_errors() {
        assert_eq!(PollOutcome::Ready("x".to_string()).into_result(), Ok("x".to_string()));
        assert_eq!(PollOutcome::GaveUpNotReady.into_result(), Err(FetchError::NotReady {}));
        assert_eq!(PollOutcome::TimedOut.into_result(), Err(FetchError::TimedOut {}));
    }
}
