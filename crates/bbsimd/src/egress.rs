//! Single-writer indication egress.
//!
//! Every actor emits through one fan-in channel consumed by a dedicated
//! egress task, the only owner of the controller stream sink. Frame
//! boundaries can therefore never interleave, whatever the actors do
//! concurrently. The sink attaches when the bring-up call arrives and
//! detaches on the first failed send (controller disconnect).

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use openolt::Indication;
use tonic::Status;

/// Sender side of one controller indication stream.
pub type StreamSink = mpsc::Sender<std::result::Result<Indication, Status>>;

const EGRESS_DEPTH: usize = 128;

enum Command {
    Attach(StreamSink),
    Frame(Indication),
}

/// Cloneable handle actors use to emit frames.
#[derive(Clone)]
pub struct EgressHandle {
    tx: mpsc::Sender<Command>,
}

impl EgressHandle {
    /// Spawns the egress task and returns its handle.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(EGRESS_DEPTH);
        tokio::spawn(
            Egress {
                mailbox: rx,
                sink: None,
            }
            .run(),
        );
        Self { tx }
    }

    /// Attaches the controller stream sink, replacing any previous one.
    pub async fn attach(&self, sink: StreamSink) {
        if self.tx.send(Command::Attach(sink)).await.is_err() {
            warn!("egress task is gone, cannot attach stream");
        }
    }

    /// Queues one indication frame for the controller.
    pub async fn emit(&self, indication: Indication) {
        if self.tx.send(Command::Frame(indication)).await.is_err() {
            warn!("egress task is gone, dropping indication");
        }
    }
}

struct Egress {
    mailbox: mpsc::Receiver<Command>,
    sink: Option<StreamSink>,
}

impl Egress {
    async fn run(mut self) {
        debug!("indication egress started");
        while let Some(command) = self.mailbox.recv().await {
            match command {
                Command::Attach(sink) => {
                    info!("controller indication stream attached");
                    self.sink = Some(sink);
                }
                Command::Frame(indication) => self.forward(indication).await,
            }
        }
        debug!("indication egress stopped");
    }

    async fn forward(&mut self, indication: Indication) {
        match &self.sink {
            Some(sink) => {
                if sink.send(Ok(indication)).await.is_err() {
                    warn!("controller stream closed, detaching sink");
                    self.sink = None;
                }
            }
            None => warn!("no controller stream attached, dropping indication"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openolt::{indication::Data, OltIndication};

    fn olt_up() -> Indication {
        Indication {
            data: Some(Data::OltInd(OltIndication {
                oper_state: "up".to_string(),
            })),
        }
    }

    #[tokio::test]
    async fn frames_reach_an_attached_sink_in_order() {
        let egress = EgressHandle::spawn();
        let (tx, mut rx) = mpsc::channel(8);
        egress.attach(tx).await;

        egress.emit(olt_up()).await;
        egress.emit(olt_up()).await;

        assert_eq!(rx.recv().await.unwrap().unwrap(), olt_up());
        assert_eq!(rx.recv().await.unwrap().unwrap(), olt_up());
    }

    #[tokio::test]
    async fn frames_without_a_sink_are_dropped() {
        let egress = EgressHandle::spawn();
        egress.emit(olt_up()).await;

        // Attaching afterwards must not replay the dropped frame.
        let (tx, mut rx) = mpsc::channel(8);
        egress.attach(tx).await;
        egress.emit(olt_up()).await;

        assert_eq!(rx.recv().await.unwrap().unwrap(), olt_up());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn disconnect_detaches_the_sink() {
        let egress = EgressHandle::spawn();
        let (tx, rx) = mpsc::channel(8);
        egress.attach(tx).await;
        drop(rx);

        // Both sends hit a closed sink; the egress task must survive.
        egress.emit(olt_up()).await;
        egress.emit(olt_up()).await;

        let (tx2, mut rx2) = mpsc::channel(8);
        egress.attach(tx2).await;
        egress.emit(olt_up()).await;
        assert_eq!(rx2.recv().await.unwrap().unwrap(), olt_up());
    }
}
