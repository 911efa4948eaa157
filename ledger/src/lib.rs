// Copyright (c) 2026 Fluwix Labs. MIT License.
// See LICENSE for details.

//! # Fluwix Ledger -- Core Library
//!
//! A permissioned fungible token ledger: balances and allowances restricted
//! to an allow-listed set of holders, with supply expansion and contraction
//! reserved for privileged operators and a global pause switch that can
//! halt economic activity atomically.
//!
//! ## Architecture
//!
//! The modules follow the gating pipeline every mutation flows through:
//!
//! - **identity** -- opaque account addresses. Authentication happens
//!   outside the ledger; an [`Address`](identity::Address) is already
//!   trusted when it arrives.
//! - **roles** -- the owner/admin hierarchy that gates privileged calls.
//! - **whitelist** -- the set of accounts eligible to receive transfers.
//! - **pause** -- the global halt flag.
//! - **ledger** -- the balance book itself: transfer, approve, mint, burn,
//!   and the checked arithmetic underneath them.
//! - **restriction** -- transfer-eligibility codes and their canonical
//!   messages.
//! - **events** -- the append-only notification log for observers.
//! - **service** -- the command surface and the single-writer lock that
//!   keeps every state transition atomic and serial.
//! - **config** -- genesis parameters.
//!
//! ## Design Notes
//!
//! 1. All amount arithmetic is checked. Wrapping arithmetic and money do
//!    not mix.
//! 2. State transitions are explicit enum variants, not boolean flags.
//! 3. Guards run before mutations -- check-then-act, never act-then-unwind.
//! 4. Every public type is serializable for wire transport and snapshots.

pub mod config;
pub mod error;
pub mod events;
pub mod identity;
pub mod ledger;
pub mod pause;
pub mod restriction;
pub mod roles;
pub mod service;
pub mod whitelist;
