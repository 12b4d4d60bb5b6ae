mod common;

use std::io;
use std::time::Duration;

use color_eyre::Result;
use pretty_assertions::assert_eq;
use serial_tap::{
    bridge,
    error::Error,
    transcript::TranscriptWriter,
    transport::{mock::MockPort, Side},
};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use common::SharedSink;

#[tokio::test(start_paused = true)]
async fn read_failure_is_fatal_and_names_the_host_side() -> Result<()> {
    let (host, host_handle) = MockPort::new();
    let (device, _device_handle) = MockPort::new();

    host_handle.fail_next(io::ErrorKind::BrokenPipe);

    let bridge = tokio::spawn(bridge::run(
        host,
        device,
        common::test_config(),
        TranscriptWriter::new(SharedSink::new()),
        CancellationToken::new(),
    ));

    sleep(Duration::from_millis(1)).await;

    let err = bridge.await?.unwrap_err();

    assert!(matches!(err, Error::Transport { side: Side::Host, .. }));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn write_failure_is_fatal_and_names_the_device_side() -> Result<()> {
    let (host, host_handle) = MockPort::new();
    let (device, device_handle) = MockPort::new();

    // The byte reads fine off the host port; relaying it is what fails.
    host_handle.push_incoming(&[0x42]);
    device_handle.fail_next(io::ErrorKind::BrokenPipe);

    let bridge = tokio::spawn(bridge::run(
        host,
        device,
        common::test_config(),
        TranscriptWriter::new(SharedSink::new()),
        CancellationToken::new(),
    ));

    sleep(Duration::from_millis(1)).await;

    let err = bridge.await?.unwrap_err();

    assert!(matches!(err, Error::Transport { side: Side::Device, .. }));

    Ok(())
}

/// Stopping mid-burst discards the unflushed bytes: they were already
/// forwarded, but no partial packet is printed.
#[tokio::test(start_paused = true)]
async fn pending_bytes_are_discarded_on_stop() -> Result<()> {
    let (host, host_handle) = MockPort::new();
    let (device, device_handle) = MockPort::new();

    let sink = SharedSink::new();
    let cancel = CancellationToken::new();

    let bridge = tokio::spawn(bridge::run(
        host,
        device,
        common::test_config(),
        TranscriptWriter::new(sink.clone()),
        cancel.clone(),
    ));

    host_handle.push_incoming(&[0xAA]);

    // Stop well inside the idle threshold.
    sleep(Duration::from_millis(1)).await;
    cancel.cancel();
    bridge.await??;

    assert_eq!(device_handle.written(), vec![0xAA]);
    assert_eq!(sink.contents(), "");

    Ok(())
}

/// A bad configuration never reaches the ports.
#[tokio::test]
async fn bad_config_fails_before_the_loop() -> Result<()> {
    let (host, _host_handle) = MockPort::new();
    let (device, _device_handle) = MockPort::new();

    let mut config = common::test_config();
    config.max_delay = 0.0;

    let err = bridge::run(
        host,
        device,
        config,
        TranscriptWriter::new(SharedSink::new()),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::BadConfig(_)));

    Ok(())
}
