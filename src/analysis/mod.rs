// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure calculators over in-memory records. Nothing here touches the
//! database or the clock; the current date is always passed in.

pub mod aggregate;
pub mod budget;
pub mod diversification;
pub mod projection;
