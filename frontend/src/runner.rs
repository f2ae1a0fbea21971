//! Headless host: replays scripted events against a board and captures the
//! shared window afterwards.

use gatekeeper_core::core::bus::{self, SHARED_RANGE};
use gatekeeper_core::core::{BusError, Machine};
use serde::Serialize;

use crate::config::{Action, Event};
use crate::error::RunError;

/// Board state after a run.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub frames: u64,
    pub host_irqs: u64,
    pub halted: bool,
    /// Shared window contents, 0xC00 first.
    pub shared: Vec<u8>,
}

impl Snapshot {
    /// Sixteen bytes per line, prefixed with the bus address.
    pub fn hex_dump(&self) -> String {
        let mut out = format!(
            "frames={} host_irqs={} halted={}\n",
            self.frames, self.host_irqs, self.halted
        );
        let base = *SHARED_RANGE.start() as usize;
        for (row, chunk) in self.shared.chunks(16).enumerate() {
            let bytes: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
            out.push_str(&format!("{:03X}: {}\n", base + row * 16, bytes.join(" ")));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostAction {
    Input { button: u8, pressed: bool },
    Poke { addr: u16, value: u8 },
}

/// Map button names to ids and check poke targets before anything runs.
fn resolve(machine: &dyn Machine, events: &[Event]) -> Result<Vec<(u64, HostAction)>, RunError> {
    let button = |frame: u64, name: &str| {
        machine
            .input_map()
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .map(|b| b.id)
            .ok_or_else(|| RunError::UnknownButton {
                frame,
                name: name.to_string(),
            })
    };

    let mut resolved = Vec::with_capacity(events.len());
    for event in events {
        let frame = event.frame;
        let action = match &event.action {
            Action::Press(name) => HostAction::Input {
                button: button(frame, name)?,
                pressed: true,
            },
            Action::Release(name) => HostAction::Input {
                button: button(frame, name)?,
                pressed: false,
            },
            Action::Poke { addr, value } => {
                match bus::classify(*addr) {
                    Ok(true) => {}
                    Ok(false) => {
                        return Err(RunError::BadPoke {
                            frame,
                            source: BusError::ReadOnly(*addr),
                        });
                    }
                    Err(source) => return Err(RunError::BadPoke { frame, source }),
                }
                HostAction::Poke {
                    addr: *addr,
                    value: *value,
                }
            }
        };
        resolved.push((frame, action));
    }
    // Stable: events on the same frame keep their script order.
    resolved.sort_by_key(|(frame, _)| *frame);
    Ok(resolved)
}

/// Run `frames` frames, applying each event just before its frame.
pub fn run_script(
    machine: &mut dyn Machine,
    events: &[Event],
    frames: u64,
) -> Result<Snapshot, RunError> {
    let mut pending = resolve(machine, events)?.into_iter().peekable();
    let mut host_irqs = 0u64;
    let mut ran = 0u64;

    for frame in 0..frames {
        while let Some((_, action)) = pending.next_if(|(f, _)| *f == frame) {
            match action {
                HostAction::Input { button, pressed } => machine.set_input(button, pressed),
                HostAction::Poke { addr, value } => machine.host_write(addr, value),
            }
        }
        machine.run_frame();
        host_irqs += u64::from(machine.take_host_irqs());
        ran += 1;

        if machine.is_halted() {
            log::warn!("board halted during frame {frame}");
            break;
        }
    }

    let skipped = pending.count();
    if skipped > 0 {
        log::warn!("{skipped} scripted event(s) were never reached");
    }

    Ok(Snapshot {
        frames: ran,
        host_irqs,
        halted: machine.is_halted(),
        shared: machine.shared_memory().to_vec(),
    })
}
