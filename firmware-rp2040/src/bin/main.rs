#![no_std]
#![no_main]

use compass_rp2040::{
    Bmx055Mag, BoardLed, BusyWork, Consumer, PeriodicTick, Producer, RingBuffer, Scheduler,
    SignalDoorbell, TxChannel, BASE_TICK_HZ,
};
use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx, UartTx};
use embassy_rp::{bind_interrupts, spi, uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use heapless::Vec;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => uart::InterruptHandler<UART0>;
});

/// Receive ring size. At 9600 baud 8N1 (ten bit times per byte) at most
/// ~9.6 bytes arrive per 10 ms tick, and the engine drains the ring every
/// tick; a command longer than one tick of traffic simply spans several
/// drain passes.
const INPUT_RING_LEN: usize = 10;

/// Transmit ring size, sized for the worst-case tick: one `$MAG` report
/// (24 bytes at the sensor's 13/15-bit axis ranges), one `$YAW` (10 bytes),
/// and the two `$ERR` replies one tick of received commands can provoke
/// (14 bytes).
const OUTPUT_RING_LEN: usize = 48;

static INPUT_RING: StaticCell<RingBuffer<INPUT_RING_LEN>> = StaticCell::new();
static OUTPUT_RING: StaticCell<RingBuffer<OUTPUT_RING_LEN>> = StaticCell::new();

/// Wakes the transmit pump whenever the engine queues output.
static TX_DOORBELL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// High-priority executor for the serial pumps; preempts the engine loop.
static PUMP_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    PUMP_EXECUTOR.on_interrupt()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("compass unit starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Serial link ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 9600;

    let uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (uart_tx, uart_rx) = uart.split();

    let (rx_producer, rx_consumer) = INPUT_RING.init(RingBuffer::new()).split();
    let (tx_producer, tx_consumer) = OUTPUT_RING.init(RingBuffer::new()).split();

    // --- Magnetometer (SPI0) ---
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 1_000_000;
    let spi_bus = spi::Spi::new_blocking(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // MOSI
        p.PIN_16, // MISO
        spi_config,
    );
    let chip_select = Output::new(p.PIN_17, Level::High);
    let mut magnetometer = Bmx055Mag::new(spi_bus, chip_select);
    magnetometer.activate();

    // --- Serial pumps, above the engine loop ---
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let pumps = PUMP_EXECUTOR.start(interrupt::SWI_IRQ_1);
    unwrap!(pumps.spawn(rx_pump(uart_rx, rx_producer)));
    unwrap!(pumps.spawn(tx_pump(uart_tx, tx_consumer, &TX_DOORBELL)));

    // --- Engine ---
    let led = BoardLed::new(Output::new(p.PIN_25, Level::Low));
    let ticks = PeriodicTick::new(Duration::from_hz(u64::from(BASE_TICK_HZ)));
    let workload = BusyWork::new(Duration::from_millis(7));
    let tx = TxChannel::new(tx_producer, SignalDoorbell::new(&TX_DOORBELL));

    let mut scheduler = Scheduler::new(magnetometer, ticks, led, workload, rx_consumer, tx);
    scheduler.prefill();
    info!("smoothing window primed, entering 100 Hz loop");
    scheduler.run()
}

/// Receive pump: every byte off the wire goes straight into the receive
/// ring; the engine drains it once per tick.
#[embassy_executor::task]
async fn rx_pump(
    mut rx: UartRx<'static, Async>,
    mut into_engine: Producer<'static, INPUT_RING_LEN>,
) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if !into_engine.try_push(byte[0]) {
                    warn!("receive ring full, dropping byte");
                }
            }
            Err(e) => warn!("uart rx error: {:?}", e),
        }
    }
}

/// Transmit pump: parks until the doorbell rings, then drains the output
/// ring in small chunks until it is empty again.
#[embassy_executor::task]
async fn tx_pump(
    mut tx: UartTx<'static, Async>,
    mut from_engine: Consumer<'static, OUTPUT_RING_LEN>,
    doorbell: &'static Signal<CriticalSectionRawMutex, ()>,
) {
    let mut chunk: Vec<u8, 16> = Vec::new();
    loop {
        doorbell.wait().await;
        loop {
            chunk.clear();
            while chunk.len() < chunk.capacity() {
                match from_engine.try_pop() {
                    Some(byte) => {
                        // Cannot fail: capacity checked above.
                        let _ = chunk.push(byte);
                    }
                    None => break,
                }
            }
            if chunk.is_empty() {
                break;
            }
            if let Err(e) = tx.write(&chunk).await {
                warn!("uart tx error: {:?}", e);
            }
        }
    }
}
