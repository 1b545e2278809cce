//! Canonical gradient sequences.

/// Full-saturation rainbow: start at red, rotate the hue across the
/// slots and land back on red.
pub const RAINBOW: &str = "r=255:|g=0:|b=0: $ g>255: repeat(auto) # r>0: repeat(auto) # b>255: repeat(auto) # g>0: repeat(auto) # r>255: repeat(auto) # b>0: repeat(auto) &*";

/// The same hue rotation traversed end-to-start.
pub const REVERSED_RAINBOW: &str = "r=255:|g=0:|b=0: $ g>255: repeat(auto) # r>0: repeat(auto) # b>255: repeat(auto) # g>0: repeat(auto) # r>255: repeat(auto) # b>0: repeat(auto) @&*";
