/// Units which are simply type aliases for `f32` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// The numeric core (phantoms, projections, attenuation chain) works on
/// plain `f32` grids for speed and for easy interop with `ndarray`. These
/// aliases keep some clues in the source as to what the numbers represent.
/// The conventions are:
///
/// + lengths in mm, or in grid units inside a phantom
///
/// + times in s
///
/// + tube voltages in kV (treated as keV-equivalent beam energy)
///
/// + attenuation coefficients per grid unit

pub type Lengthf32      = f32;
pub type Timef32        = f32;
pub type Ratiof32       = f32;
pub type Anglef32       = f32; // degrees
pub type Voltagef32     = f32; // kV
pub type Intensityf32   = f32; // TODO uom Intensity
pub type Attenuationf32 = f32; // TODO uom PerLength
