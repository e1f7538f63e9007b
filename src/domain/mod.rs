// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

mod review;

pub use review::*;
