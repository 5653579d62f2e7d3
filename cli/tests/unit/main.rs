//! Integration tests for the transport, the tailer and the commands

mod test_reqwest;
mod test_tail;
mod test_transport;
