// Copyright (c) Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod banks;
pub mod cli;
pub mod installments;
pub mod models;
pub mod store;
pub mod utils;
pub mod commands;
