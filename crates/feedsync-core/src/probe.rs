//! Reachability probe for hosts without a native online/offline event.
//!
//! Periodically opens a TCP connection to the store and reports only
//! transitions, starting from the assumption that the network is up.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::observer::{RawSignal, SignalObserver};

#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
    host: String,
    port: u16,
    interval: Duration,
    timeout: Duration,
}

impl ConnectivityProbe {
    pub fn new(host: impl Into<String>, port: u16, interval: Duration, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            interval,
            timeout,
        }
    }

    /// One reachability check. Timeouts count as unreachable.
    pub async fn check(&self) -> bool {
        match tokio::time::timeout(
            self.timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(host = %self.host, port = self.port, error = %e, "probe failed");
                false
            }
            Err(_) => {
                debug!(host = %self.host, port = self.port, "probe timed out");
                false
            }
        }
    }

    /// Run the probe until the observed session ends.
    pub fn spawn(self, observer: SignalObserver) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut online = true;

            loop {
                ticker.tick().await;
                if observer.is_closed() {
                    break;
                }
                let reachable = self.check().await;
                if reachable == online {
                    continue;
                }
                online = reachable;
                info!(host = %self.host, port = self.port, online, "connectivity changed");
                observer
                    .relay(if online {
                        RawSignal::Online
                    } else {
                        RawSignal::Offline
                    })
                    .await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    use super::*;
    use crate::session::{SessionCommand, SessionHandle};

    /// A loopback port with nothing listening on it.
    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    fn probe(port: u16) -> ConnectivityProbe {
        ConnectivityProbe::new(
            "127.0.0.1",
            port,
            Duration::from_millis(20),
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn check_reaches_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(probe(port).check().await);
    }

    #[tokio::test]
    async fn check_fails_on_closed_port() {
        let port = closed_port().await;
        assert!(!probe(port).check().await);
    }

    #[tokio::test]
    async fn reports_offline_once() {
        let port = closed_port().await;
        let (tx, mut rx) = mpsc::channel(8);
        let observer = SignalObserver::new(SessionHandle::from_sender(tx));
        let task = probe(port).spawn(observer);

        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(SessionCommand::Connectivity(false)));

        // Still down: no repeat report.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());

        drop(rx);
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();
    }
}
