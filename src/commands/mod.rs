// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cards;
pub mod doctor;
pub mod exporter;
pub mod purchases;
pub mod reports;
pub mod transactions;
