//! Record feed: a bounded, ordered channel in front of a [`SinkAdapter`].
//!
//! Producers get two signals from the feed. A full channel means pause:
//! `send_*` waits for room, `try_send_one` fails with `FeedFull`. An
//! acknowledgement means done: it resolves once the record's line has been
//! written. Malformed input is rejected on the producer's side before it is
//! queued.
//!
//! The adapter does not spawn anything; the host awaits
//! [`SinkAdapter::drain`] on a task of its choosing.

use crate::app::AdapterConfig;
use crate::domain::{AdapterError, IntoRecord, Record};
use crate::sink::{BatchOutcome, RecordConsumer, SinkAdapter};
use std::io::Write;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

type AckSender = oneshot::Sender<Result<BatchOutcome, AdapterError>>;

enum Delivery {
    One(Record),
    Batch(Vec<Record>),
}

struct Envelope {
    delivery: Delivery,
    ack: AckSender,
}

/// Create a feed holding at most `capacity` pending deliveries.
pub fn channel(capacity: usize) -> (FeedHandle, FeedReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (FeedHandle { tx }, FeedReceiver { rx })
}

/// Create a feed sized by `feed_capacity`.
pub fn channel_from_config(config: &AdapterConfig) -> (FeedHandle, FeedReceiver) {
    channel(config.feed_capacity)
}

/// Producer side of a feed. Cheap to clone; the feed closes when every
/// handle is dropped.
#[derive(Clone)]
pub struct FeedHandle {
    tx: mpsc::Sender<Envelope>,
}

/// Consumer side of a feed, handed to [`SinkAdapter::drain`].
pub struct FeedReceiver {
    rx: mpsc::Receiver<Envelope>,
}

/// Completion of a queued delivery.
#[must_use = "an acknowledgement does nothing unless awaited"]
pub struct Acknowledgement {
    rx: oneshot::Receiver<Result<BatchOutcome, AdapterError>>,
}

impl Acknowledgement {
    /// Resolves after the adapter processed the delivery.
    pub async fn wait(self) -> Result<BatchOutcome, AdapterError> {
        self.rx.await.map_err(|_| AdapterError::FeedClosed)?
    }
}

impl FeedHandle {
    /// Queue one record, waiting for room, and resolve once it is written.
    pub async fn send_one<R: IntoRecord>(&self, record: R) -> Result<(), AdapterError> {
        let record = record.into_record()?;
        self.enqueue(Delivery::One(record)).await?.wait().await?;
        Ok(())
    }

    /// Queue a batch, waiting for room, and resolve once it is processed.
    ///
    /// Every record is checked before anything is queued, so a malformed
    /// element fails the call without touching the feed.
    pub async fn send_batch<I>(&self, records: I) -> Result<BatchOutcome, AdapterError>
    where
        I: IntoIterator,
        I::Item: IntoRecord,
    {
        let records = records
            .into_iter()
            .map(IntoRecord::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.enqueue(Delivery::Batch(records)).await?.wait().await
    }

    /// Queue one record without waiting for room.
    pub fn try_send_one<R: IntoRecord>(&self, record: R) -> Result<Acknowledgement, AdapterError> {
        let record = record.into_record()?;
        let (ack, rx) = oneshot::channel();
        let envelope = Envelope {
            delivery: Delivery::One(record),
            ack,
        };

        self.tx.try_send(envelope).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => AdapterError::FeedFull,
            mpsc::error::TrySendError::Closed(_) => AdapterError::FeedClosed,
        })?;
        Ok(Acknowledgement { rx })
    }

    /// Free slots right now.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn enqueue(&self, delivery: Delivery) -> Result<Acknowledgement, AdapterError> {
        let (ack, rx) = oneshot::channel();
        self.tx
            .send(Envelope { delivery, ack })
            .await
            .map_err(|_| AdapterError::FeedClosed)?;
        Ok(Acknowledgement { rx })
    }
}

impl<W: Write> SinkAdapter<W> {
    /// Process deliveries in arrival order until every handle is dropped.
    /// Returns the number of deliveries processed.
    pub async fn drain(&self, mut feed: FeedReceiver) -> usize {
        info!("Record feed drain started");
        let mut processed = 0;

        while let Some(Envelope { delivery, ack }) = feed.rx.recv().await {
            let result = match delivery {
                Delivery::One(record) => self
                    .accept_one(record)
                    .map(|()| BatchOutcome::written(1)),
                Delivery::Batch(records) => self.accept_batch(records),
            };
            processed += 1;

            if ack.send(result).is_err() {
                debug!("Producer dropped acknowledgement before completion");
            }
        }

        info!(processed, "Record feed drain finished");
        processed
    }
}
