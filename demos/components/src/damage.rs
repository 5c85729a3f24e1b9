//! Damage dealers.
//!
//! Each dealer answers a deal-damage event by rolling its die and pushing
//! one [`Damage`] entry, so several dealers on one entity stack. The three
//! flavours are distinct component types so an entity can carry one of each.

use rand::SeedableRng;
use rand::rngs::StdRng;
use spark_component::EntityId;
use spark_event::{Damage, DamageType, Event};
use spark_world::Component;

use crate::die::Die;

/// A die plus the rng it rolls with.
#[derive(Debug, Clone)]
pub struct DamageRoll {
    die: Die,
    damage_type: DamageType,
    rng: StdRng,
}

impl DamageRoll {
    #[must_use]
    pub fn new(die: Die, damage_type: DamageType, seed: u64) -> Self {
        Self {
            die,
            damage_type,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn die(&self) -> Die {
        self.die
    }

    pub fn damage_type(&self) -> DamageType {
        self.damage_type
    }

    fn apply(&mut self, event: &mut Event) {
        if let Some(deal) = event.deal_damage_mut() {
            let amount = i32::try_from(self.die.roll(&mut self.rng)).unwrap_or(i32::MAX);
            deal.damage.push(Damage::new(amount, self.damage_type));
        }
    }
}

macro_rules! damage_component {
    ($(#[$meta:meta])* $name:ident => $damage_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(DamageRoll);

        impl $name {
            /// A dealer rolling `die`, seeded with `seed`.
            #[must_use]
            pub fn new(die: Die, seed: u64) -> Self {
                Self(DamageRoll::new(die, $damage_type, seed))
            }

            pub fn roll(&self) -> &DamageRoll {
                &self.0
            }
        }

        impl Component for $name {
            fn handle_event(&mut self, _owner: EntityId, event: &mut Event) {
                self.0.apply(event);
            }
        }
    };
}

damage_component! {
    /// Plain slashing damage.
    DamageComponent => DamageType::Slash
}

damage_component! {
    FireDamageComponent => DamageType::Fire
}

damage_component! {
    IceDamageComponent => DamageType::Ice
}
