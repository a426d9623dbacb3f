// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{frame_clock::FrameClock, timer::Timer};

pub trait Runtime: 'static {
    type Timer: Timer + Default;
    type FrameClock: FrameClock + Default;
}
