//! The value every message handler returns: its result plus what it has to tell the outside.

use core::marker::PhantomData;

use crate::events::IbcEvent;

pub type HandlerResult<T, E> = Result<HandlerOutput<T>, E>;

/// A successful handler run. Nothing is persisted yet: the caller hands `result` to a keeper
/// and forwards `events` once the whole transaction went through.
#[derive(Clone, Debug)]
pub struct HandlerOutput<T> {
    pub result: T,
    pub log: Vec<String>,
    pub events: Vec<IbcEvent>,
}

impl<T> HandlerOutput<T> {
    pub fn builder() -> HandlerOutputBuilder<T> {
        HandlerOutputBuilder::new()
    }
}

/// Collects log lines and events while a handler runs; `with_result` seals them.
#[derive(Clone, Debug, Default)]
pub struct HandlerOutputBuilder<T> {
    log: Vec<String>,
    events: Vec<IbcEvent>,
    marker: PhantomData<T>,
}

impl<T> HandlerOutputBuilder<T> {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            events: Vec::new(),
            marker: PhantomData,
        }
    }

    pub fn with_log(mut self, log: impl Into<Vec<String>>) -> Self {
        self.log.append(&mut log.into());
        self
    }

    pub fn with_events(mut self, mut events: Vec<IbcEvent>) -> Self {
        self.events.append(&mut events);
        self
    }

    pub fn log(&mut self, log: impl Into<String>) {
        self.log.push(log.into());
    }

    pub fn emit(&mut self, event: IbcEvent) {
        self.events.push(event);
    }

    pub fn with_result(self, result: T) -> HandlerOutput<T> {
        HandlerOutput {
            result,
            log: self.log,
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::events::MessageEvent;

    #[test]
    fn inherited_log_and_events_precede_new_ones() {
        let mut output = HandlerOutput::<()>::builder()
            .with_log(vec!["inner".to_string()])
            .with_events(vec![MessageEvent::Client.into()]);
        output.log("outer");
        output.emit(MessageEvent::Connection.into());

        let output = output.with_result(());
        assert_eq!(output.log, vec!["inner".to_string(), "outer".to_string()]);
        assert_eq!(output.events.len(), 2);
        assert!(matches!(output.events[0], IbcEvent::Message(MessageEvent::Client)));
        assert!(matches!(output.events[1], IbcEvent::Message(MessageEvent::Connection)));
    }
}
