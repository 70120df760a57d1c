// Binary persistence for editable automata and read-only dictionaries.
//
// Layout, all integers big-endian:
//
//   editable flag      1 byte (0 = read-only)
//   state count        i32
//   per state, in handle order:
//     terminal         1 byte
//     out-degree       i16
//     if editable:
//       inbound count  i16
//       origin label   u16
//     per transition:
//       label          u16
//       target         i32
//
// Loading validates everything search relies on (target ranges, label order,
// acyclicity) so that a loaded structure cannot panic or loop. Readers are
// not buffered here: a stream may carry more data after the automaton, and
// nothing past it is consumed.

use std::io::{self, BufWriter, Read, Write};

use crate::arena::StateArena;
use crate::builder::Automaton;
use crate::dictionary::Dictionary;
use crate::search::Search;
use crate::state::{Handle, Label, State};
use crate::{DawgError, ROOT};

/// Size of the stream header in bytes.
pub const HEADER_SIZE: usize = 5;

/// Upper bound on states preallocated from an untrusted header.
const MAX_PREALLOCATED_STATES: usize = 1 << 16;

/// Stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Whether per-state editing data (inbound count, origin label) follows.
    pub editable: bool,
    pub state_count: u32,
}

// ---------------------------------------------------------------------------
// Primitive reads and writes
// ---------------------------------------------------------------------------

fn read_array<const N: usize, R: Read + ?Sized>(reader: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_bool<R: Read + ?Sized>(reader: &mut R) -> io::Result<bool> {
    Ok(read_array::<1, _>(reader)?[0] != 0)
}

fn read_i16<R: Read + ?Sized>(reader: &mut R) -> io::Result<i16> {
    Ok(i16::from_be_bytes(read_array(reader)?))
}

fn read_u16<R: Read + ?Sized>(reader: &mut R) -> io::Result<u16> {
    Ok(u16::from_be_bytes(read_array(reader)?))
}

fn read_i32<R: Read + ?Sized>(reader: &mut R) -> io::Result<i32> {
    Ok(i32::from_be_bytes(read_array(reader)?))
}

fn write_i16_count<W: Write + ?Sized>(
    writer: &mut W,
    what: &'static str,
    count: usize,
) -> Result<(), DawgError> {
    let value = i16::try_from(count).map_err(|_| DawgError::CountOverflow { what, count })?;
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Read and validate the stream header.
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<Header, DawgError> {
    let editable = read_bool(reader)?;
    let count = read_i32(reader)?;
    if count < 0 {
        return Err(DawgError::InvalidStateCount(count));
    }
    if count == 0 {
        return Err(DawgError::EmptyAutomaton);
    }
    Ok(Header {
        editable,
        state_count: count as u32,
    })
}

pub fn write_header<W: Write + ?Sized>(writer: &mut W, header: Header) -> Result<(), DawgError> {
    let count = i32::try_from(header.state_count).map_err(|_| DawgError::CountOverflow {
        what: "state count",
        count: header.state_count as usize,
    })?;
    writer.write_all(&[u8::from(header.editable)])?;
    writer.write_all(&count.to_be_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// State records
// ---------------------------------------------------------------------------

/// One decoded state record.
struct Record {
    terminal: bool,
    inbound: u32,
    origin: Label,
    labels: Box<[Label]>,
    targets: Box<[Handle]>,
}

fn read_record<R: Read + ?Sized>(
    reader: &mut R,
    state: Handle,
    header: Header,
) -> Result<Record, DawgError> {
    let terminal = read_bool(reader)?;
    let out_degree = read_i16(reader)?;
    if out_degree < 0 {
        return Err(DawgError::InvalidTransitionCount {
            state,
            count: out_degree,
        });
    }

    let (inbound, origin) = if header.editable {
        let inbound = read_i16(reader)?;
        if inbound < 0 {
            return Err(DawgError::InvalidInboundCount {
                state,
                count: inbound,
            });
        }
        (inbound as u32, read_u16(reader)?)
    } else {
        (0, 0)
    };

    let out_degree = out_degree as usize;
    let mut labels = Vec::with_capacity(out_degree);
    let mut targets = Vec::with_capacity(out_degree);
    for _ in 0..out_degree {
        let label = read_u16(reader)?;
        let target = read_i32(reader)?;
        if labels.last().is_some_and(|&prev| prev >= label) {
            return Err(DawgError::UnsortedLabels { state });
        }
        if target < 0 || target as u32 >= header.state_count {
            return Err(DawgError::InvalidTarget { state, target });
        }
        labels.push(label);
        targets.push(target as Handle);
    }

    Ok(Record {
        terminal,
        inbound,
        origin,
        labels: labels.into_boxed_slice(),
        targets: targets.into_boxed_slice(),
    })
}

/// Write one record. `editing` carries `(inbound, origin)` for editable streams.
fn write_record<W: Write + ?Sized>(
    writer: &mut W,
    terminal: bool,
    editing: Option<(u32, Label)>,
    labels: &[Label],
    targets: &[Handle],
) -> Result<(), DawgError> {
    writer.write_all(&[u8::from(terminal)])?;
    write_i16_count(writer, "out-degree", labels.len())?;
    if let Some((inbound, origin)) = editing {
        write_i16_count(writer, "inbound count", inbound as usize)?;
        writer.write_all(&origin.to_be_bytes())?;
    }
    for (&label, &target) in labels.iter().zip(targets) {
        let target = i32::try_from(target).map_err(|_| DawgError::CountOverflow {
            what: "target handle",
            count: target as usize,
        })?;
        writer.write_all(&label.to_be_bytes())?;
        writer.write_all(&target.to_be_bytes())?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject graphs with a cycle anywhere, reachable from the root or not.
pub fn check_acyclic<S: Search + ?Sized>(search: &S) -> Result<(), DawgError> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let n = search.state_count();
    let mut marks = vec![Mark::Unvisited; n];
    let mut stack: Vec<(Handle, usize)> = Vec::new();

    for start in 0..n {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        marks[start] = Mark::OnStack;
        stack.push((start as Handle, 0));

        while let Some(top) = stack.last_mut() {
            let (state, next) = *top;
            let (_, targets) = search.edges(state);
            if next < targets.len() {
                top.1 += 1;
                let target = targets[next];
                match marks[target as usize] {
                    Mark::Unvisited => {
                        marks[target as usize] = Mark::OnStack;
                        stack.push((target, 0));
                    }
                    Mark::OnStack => return Err(DawgError::CyclicGraph { state: target }),
                    Mark::Done => {}
                }
            } else {
                marks[state as usize] = Mark::Done;
                stack.pop();
            }
        }
    }
    Ok(())
}

/// Stored inbound counts must equal the edges of live states. A state is
/// live if it is the root or has a non-zero stored count; the others are
/// discarded slots whose stale edges no longer count.
fn check_inbound(arena: &StateArena) -> Result<(), DawgError> {
    let mut counts = vec![0u32; arena.len()];
    for (handle, state) in arena.states().iter().enumerate() {
        if handle as Handle == ROOT || state.inbound() > 0 {
            for &target in state.targets() {
                counts[target as usize] += 1;
            }
        }
    }
    for (handle, state) in arena.states().iter().enumerate() {
        if state.inbound() != counts[handle] {
            return Err(DawgError::InboundMismatch {
                state: handle as Handle,
                expected: counts[handle],
                actual: state.inbound(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

/// Save an editable automaton, with or without its editing data.
pub fn write_automaton<W: Write>(
    automaton: &Automaton,
    editable: bool,
    writer: W,
) -> Result<(), DawgError> {
    let states = automaton.states();
    let mut writer = BufWriter::new(writer);
    write_header(
        &mut writer,
        Header {
            editable,
            state_count: state_count_u32(states.len())?,
        },
    )?;
    for state in states {
        let editing = editable.then(|| (state.inbound(), state.origin()));
        write_record(
            &mut writer,
            state.is_terminal(),
            editing,
            state.labels(),
            state.targets(),
        )?;
    }
    writer.flush()?;
    log::debug!(
        "saved {} states ({} discarded), editable={editable}",
        states.len(),
        automaton.discarded_count()
    );
    Ok(())
}

/// Save a dictionary in the read-only format.
pub fn write_dictionary<W: Write>(dict: &Dictionary, writer: W) -> Result<(), DawgError> {
    let count = dict.state_count();
    let mut writer = BufWriter::new(writer);
    write_header(
        &mut writer,
        Header {
            editable: false,
            state_count: state_count_u32(count)?,
        },
    )?;
    for state in 0..count as Handle {
        let (labels, targets) = dict.edges(state);
        write_record(&mut writer, dict.is_terminal(state), None, labels, targets)?;
    }
    writer.flush()?;
    log::debug!("saved read-only dictionary with {count} states");
    Ok(())
}

fn state_count_u32(count: usize) -> Result<u32, DawgError> {
    u32::try_from(count).map_err(|_| DawgError::CountOverflow {
        what: "state count",
        count,
    })
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load a search-only dictionary from a stream in either format.
pub fn read_dictionary<R: Read>(mut reader: R) -> Result<Dictionary, DawgError> {
    let header = read_header(&mut reader)?;
    let count = header.state_count as usize;
    let mut dict = Dictionary::with_capacity(count.min(MAX_PREALLOCATED_STATES));
    for state in 0..header.state_count {
        let record = read_record(&mut reader, state, header)?;
        dict.push_state(record.terminal, &record.labels, &record.targets);
    }
    check_acyclic(&dict)?;
    log::debug!(
        "loaded dictionary with {count} states from {} stream",
        if header.editable { "editable" } else { "read-only" }
    );
    Ok(dict)
}

/// Load an editable automaton. Fails with [`DawgError::NotEditable`] on a
/// read-only stream.
pub fn read_automaton<R: Read>(mut reader: R) -> Result<Automaton, DawgError> {
    let header = read_header(&mut reader)?;
    if !header.editable {
        return Err(DawgError::NotEditable);
    }
    let count = header.state_count as usize;
    let mut states = Vec::with_capacity(count.min(MAX_PREALLOCATED_STATES));
    for state in 0..header.state_count {
        let record = read_record(&mut reader, state, header)?;
        states.push(State::from_parts(
            record.terminal,
            record.origin,
            record.inbound,
            record.labels,
            record.targets,
        ));
    }

    let arena = StateArena::from_states(states);
    check_acyclic(&arena)?;
    check_inbound(&arena)?;

    let automaton = Automaton::from_arena(arena);
    log::debug!(
        "loaded editable automaton with {count} states ({} discarded)",
        automaton.discarded_count()
    );
    Ok(automaton)
}
