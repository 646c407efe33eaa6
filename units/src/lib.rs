//! Physical quantities used at the edges of the simulator.
//!
//! Configuration files and command-line collaborators speak in `uom`
//! quantities with explicit units (`"50 cm"`, `"35 kV"`, `"500 ms"`); the
//! numeric core works with the plain `f32` aliases in [`todo`]. The pithy
//! constructors and accessors below convert between the two.

pub mod todo;

pub use uom;
pub use uom::si::Quantity;
pub use uom::si::f32::{ElectricPotential, Length, Time};

mod units {
  pub use uom::si::{length            ::{millimeter, centimeter, meter},
                    time              ::{second, millisecond},
                    electric_potential::kilovolt,
  };
}

// Making values from float literals seems to be very long-winded, so provide
// some pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f32) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(mm    Length            millimeter);
wrap!(cm    Length            centimeter);
wrap!(m     Length                 meter);
wrap!(s     Time                  second);
wrap!(ms    Time             millisecond);
wrap!(kv    ElectricPotential   kilovolt);

// Reverse direction of the above: the units in which the core expects them.
pub fn mm_   (x: Length           ) -> f32 { x.get::<units::millimeter>() }
pub fn s_    (x: Time             ) -> f32 { x.get::<units::second>    () }
pub fn kv_   (x: ElectricPotential) -> f32 { x.get::<units::kilovolt>  () }

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}
