// "Upload happened" counter used to invalidate cached history
use tokio::sync::watch;

pub struct RefreshSignal {
    tx: watch::Sender<u64>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    pub(crate) fn advance(&self) -> u64 {
        let mut next = 0;
        self.tx.send_modify(|n| {
            *n += 1;
            next = *n;
        });
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}
