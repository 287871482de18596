#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Starweave client.
//!
//! This crate defines the message surface that connects the renderer to its
//! host application and to rendering adapters. The host delivers read-only
//! [`Snapshot`] values at a fixed cadence, the renderer consumes them and
//! emits [`Intent`] values describing user actions. Nothing in this crate
//! mutates simulation state; everything is data.

use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a galaxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GalaxyId(u32);

impl GalaxyId {
    /// Creates a new galaxy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a star system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(u32);

impl SystemId {
    /// Creates a new system identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanetId(u32);

impl PlanetId {
    /// Creates a new planet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a portal endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortalId(u32);

impl PortalId {
    /// Creates a new portal identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an empire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmpireId(u32);

impl EmpireId {
    /// Creates a new empire identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an in-transit fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FleetId(u32);

impl FleetId {
    /// Creates a new fleet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a simulation entity (structure or unit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Tagged reference to any interactive object the renderer can select.
///
/// The snapshot contract carries the object kind explicitly so consumers
/// never re-derive it from identifier formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectRef {
    /// A galaxy visible in universe view.
    Galaxy(GalaxyId),
    /// A star system visible in universe and galaxy views.
    System(SystemId),
    /// A planet orbiting within a system.
    Planet(PlanetId),
    /// One endpoint of a paired portal link.
    Portal(PortalId),
    /// A fleet in transit between two systems.
    Fleet(FleetId),
}

impl ObjectRef {
    /// Returns the kind discriminant for the referenced object.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Galaxy(_) => ObjectKind::Galaxy,
            Self::System(_) => ObjectKind::System,
            Self::Planet(_) => ObjectKind::Planet,
            Self::Portal(_) => ObjectKind::Portal,
            Self::Fleet(_) => ObjectKind::Fleet,
        }
    }

    /// Returns the planet identifier when the reference is planet-typed.
    #[must_use]
    pub const fn as_planet(&self) -> Option<PlanetId> {
        match self {
            Self::Planet(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the system identifier when the reference is system-typed.
    #[must_use]
    pub const fn as_system(&self) -> Option<SystemId> {
        match self {
            Self::System(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the galaxy identifier when the reference is galaxy-typed.
    #[must_use]
    pub const fn as_galaxy(&self) -> Option<GalaxyId> {
        match self {
            Self::Galaxy(id) => Some(*id),
            _ => None,
        }
    }
}

/// Kind discriminant carried by [`ObjectRef`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Galaxy object.
    Galaxy,
    /// Star system object.
    System,
    /// Planet object.
    Planet,
    /// Portal endpoint object.
    Portal,
    /// Fleet object.
    Fleet,
}

/// Navigation mode describing which scale of the universe is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    /// Whole-universe view showing every galaxy.
    Universe,
    /// Single-galaxy view showing its star systems.
    Galaxy,
    /// Single-system view showing orbiting planets.
    System,
    /// Planet surface view showing the terrain grid.
    Planet,
}

/// World-space point used for galaxy and system positions.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal world coordinate.
    pub x: f32,
    /// Vertical world coordinate.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Identifying color assigned to an empire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmpireColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EmpireColor {
    /// Creates a new empire color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Closed set of star colors used for glow sprite synthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarColor {
    /// Cool red dwarf.
    Red,
    /// Orange star.
    Orange,
    /// Sun-like yellow star.
    Yellow,
    /// Bright white star.
    White,
    /// Hot blue giant.
    Blue,
}

impl StarColor {
    /// All star colors in canonical order, used to pre-warm sprite caches.
    pub const ALL: [Self; 5] = [Self::Red, Self::Orange, Self::Yellow, Self::White, Self::Blue];

    /// Stable lowercase name used in sprite cache keys.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Blue => "blue",
        }
    }
}

/// Classification of a planet's dominant environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetKind {
    /// Temperate, habitable world.
    Terran,
    /// Water-covered world.
    Ocean,
    /// Arid world.
    Desert,
    /// Frozen world.
    Ice,
    /// Gas giant without a solid surface.
    Gas,
    /// Airless rock.
    Barren,
}

/// Immutable description of a galaxy within a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxySnapshot {
    /// Identifier assigned to the galaxy.
    pub id: GalaxyId,
    /// Display name of the galaxy.
    pub name: String,
    /// Center position in universe world space.
    pub position: WorldPoint,
    /// Visual radius in world units; also the universe-view hit radius.
    pub radius: f32,
}

/// Immutable description of a star system within a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Identifier assigned to the system.
    pub id: SystemId,
    /// Galaxy that contains the system.
    pub galaxy: GalaxyId,
    /// Display name of the system.
    pub name: String,
    /// Position in galaxy world space.
    pub position: WorldPoint,
    /// Color of the system's star.
    pub star: StarColor,
    /// Empire controlling the system, if any.
    pub owner: Option<EmpireId>,
}

/// Immutable description of a planet within a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetSnapshot {
    /// Identifier assigned to the planet.
    pub id: PlanetId,
    /// System the planet orbits within.
    pub system: SystemId,
    /// Display name of the planet.
    pub name: String,
    /// Zero-based orbit ring index, innermost first.
    pub orbit: u8,
    /// Environment classification.
    pub kind: PlanetKind,
    /// Empire controlling the planet, if any.
    pub owner: Option<EmpireId>,
}

/// Immutable description of one portal endpoint within a snapshot.
///
/// Portals always come in pairs; `paired` names the endpoint on the far
/// side of the link.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalSnapshot {
    /// Identifier assigned to this endpoint.
    pub id: PortalId,
    /// System that hosts this endpoint.
    pub system: SystemId,
    /// Endpoint on the far side of the link.
    pub paired: PortalId,
}

/// Immutable description of an empire within a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmpireSnapshot {
    /// Identifier assigned to the empire.
    pub id: EmpireId,
    /// Display name of the empire.
    pub name: String,
    /// Identifying color used for ownership overlays.
    pub color: EmpireColor,
}

/// Location reference carried by simulation entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLocation {
    /// Entity stationed on a planet surface.
    Planet(PlanetId),
    /// Entity loose within a star system.
    System(SystemId),
}

/// Classification of a simulation entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Constructed building bound to a planet surface tile.
    Structure(BuildingKind),
    /// Mobile friendly or neutral unit.
    Unit,
    /// Hostile crisis unit; drives the per-system threat overlay.
    Crisis,
}

/// Building classification carried by structure entities and surface tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Resource extractor.
    Mine,
    /// Population center.
    Habitat,
    /// Orbital lift connecting surface and space.
    SpacePort,
    /// Planetary defense emplacement.
    ShieldGenerator,
    /// Research installation.
    Laboratory,
}

/// Immutable description of a simulation entity within a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Identifier assigned to the entity.
    pub id: EntityId,
    /// Classification of the entity.
    pub kind: EntityKind,
    /// Empire controlling the entity; crisis units have no owner.
    pub owner: Option<EmpireId>,
    /// Where the entity currently is.
    pub location: EntityLocation,
}

/// Immutable description of a fleet in transit between two systems.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Identifier assigned to the fleet.
    pub id: FleetId,
    /// Empire the fleet belongs to.
    pub owner: EmpireId,
    /// System the fleet departed from.
    pub origin: SystemId,
    /// System the fleet is travelling toward.
    pub destination: SystemId,
    /// Travel completion in the range `0.0..=1.0`.
    pub progress: f32,
}

/// Discrete event recently produced by the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick at which the event occurred.
    pub tick: u64,
    /// Short human-readable description.
    pub message: String,
    /// Object the event concerns, when one exists.
    pub subject: Option<ObjectRef>,
}

/// Periodic read-only representation of simulation state.
///
/// Delivered by the host collaborator at a fixed external cadence. The
/// renderer rebuilds its derived lookup tables only when `tick` advances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Monotonically increasing simulation tick counter.
    pub tick: u64,
    /// Galaxies composing the universe topology.
    pub galaxies: Vec<GalaxySnapshot>,
    /// Star systems contained in the galaxies.
    pub systems: Vec<SystemSnapshot>,
    /// Planets orbiting within the systems.
    pub planets: Vec<PlanetSnapshot>,
    /// Portal endpoints linking pairs of systems.
    pub portals: Vec<PortalSnapshot>,
    /// Empires participating in the simulation.
    pub empires: Vec<EmpireSnapshot>,
    /// Structures and units with a location reference.
    pub entities: Vec<EntitySnapshot>,
    /// Fleets in transit between systems.
    pub fleets: Vec<FleetSnapshot>,
    /// Recent discrete events.
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    /// Looks up a galaxy by identifier.
    #[must_use]
    pub fn galaxy(&self, id: GalaxyId) -> Option<&GalaxySnapshot> {
        self.galaxies.iter().find(|galaxy| galaxy.id == id)
    }

    /// Looks up a system by identifier.
    #[must_use]
    pub fn system(&self, id: SystemId) -> Option<&SystemSnapshot> {
        self.systems.iter().find(|system| system.id == id)
    }

    /// Looks up a planet by identifier.
    #[must_use]
    pub fn planet(&self, id: PlanetId) -> Option<&PlanetSnapshot> {
        self.planets.iter().find(|planet| planet.id == id)
    }

    /// Looks up a portal endpoint by identifier.
    #[must_use]
    pub fn portal(&self, id: PortalId) -> Option<&PortalSnapshot> {
        self.portals.iter().find(|portal| portal.id == id)
    }

    /// Looks up an empire by identifier.
    #[must_use]
    pub fn empire(&self, id: EmpireId) -> Option<&EmpireSnapshot> {
        self.empires.iter().find(|empire| empire.id == id)
    }

    /// Resolves the system a planet orbits within.
    #[must_use]
    pub fn system_of_planet(&self, id: PlanetId) -> Option<&SystemSnapshot> {
        self.planet(id).and_then(|planet| self.system(planet.system))
    }

    /// Resolves the galaxy that contains a system.
    #[must_use]
    pub fn galaxy_of_system(&self, id: SystemId) -> Option<&GalaxySnapshot> {
        self.system(id).and_then(|system| self.galaxy(system.galaxy))
    }

    /// Resolves the system hosting a portal endpoint.
    #[must_use]
    pub fn system_of_portal(&self, id: PortalId) -> Option<&SystemSnapshot> {
        self.portal(id).and_then(|portal| self.system(portal.system))
    }

    /// First galaxy in snapshot order, the resolver's last-resort fallback.
    #[must_use]
    pub fn first_galaxy(&self) -> Option<&GalaxySnapshot> {
        self.galaxies.first()
    }

    /// First system in snapshot order, the resolver's last-resort fallback.
    #[must_use]
    pub fn first_system(&self) -> Option<&SystemSnapshot> {
        self.systems.first()
    }

    /// First planet in snapshot order, the resolver's last-resort fallback.
    #[must_use]
    pub fn first_planet(&self) -> Option<&PlanetSnapshot> {
        self.planets.first()
    }

    /// Systems belonging to the provided galaxy, in snapshot order.
    pub fn systems_in_galaxy(&self, id: GalaxyId) -> impl Iterator<Item = &SystemSnapshot> {
        self.systems.iter().filter(move |system| system.galaxy == id)
    }

    /// Planets orbiting within the provided system, in snapshot order.
    pub fn planets_in_system(&self, id: SystemId) -> impl Iterator<Item = &PlanetSnapshot> {
        self.planets.iter().filter(move |planet| planet.system == id)
    }

    /// Portal endpoints hosted by the provided system, in snapshot order.
    pub fn portals_in_system(&self, id: SystemId) -> impl Iterator<Item = &PortalSnapshot> {
        self.portals.iter().filter(move |portal| portal.system == id)
    }
}

/// Terrain classification for a single surface tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Open buildable ground.
    Plains,
    /// Rolling terrain, buildable at a penalty.
    Hills,
    /// Impassable peaks.
    Mountain,
    /// Liquid surface.
    Water,
    /// Harvestable crystal formation.
    Crystal,
    /// Ruined, unbuildable ground.
    Wasteland,
}

/// Reference to a building occupying a surface tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingRef {
    /// Entity the building corresponds to in the snapshot.
    pub entity: EntityId,
    /// Classification of the building.
    pub kind: BuildingKind,
}

/// Single tile of a planet's surface grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTile {
    /// Terrain occupying the tile.
    pub terrain: TerrainKind,
    /// Building placed on the tile, if any.
    pub building: Option<BuildingRef>,
}

/// Detailed surface layout for one planet, fetched on demand.
///
/// Not part of [`Snapshot`]; the renderer signals
/// [`Intent::SurfaceDataNeeded`] when it first needs one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGrid {
    /// Planet the grid belongs to.
    pub planet: PlanetId,
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Tiles in row-major order; length is `columns * rows`.
    pub tiles: Vec<SurfaceTile>,
}

impl SurfaceGrid {
    /// Returns the tile at the provided column and row, if in range.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<&SurfaceTile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = usize::try_from(row)
            .ok()?
            .checked_mul(usize::try_from(self.columns).ok()?)?
            .checked_add(usize::try_from(column).ok()?)?;
        self.tiles.get(index)
    }
}

/// User-action intents emitted by the renderer toward its host.
///
/// Fired only in response to user interaction, never spontaneously.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// The generic selection changed to the referenced object.
    SelectionChanged {
        /// Object that became selected.
        object: ObjectRef,
    },
    /// The user requested a view-mode change through the renderer.
    ViewModeChangeRequested {
        /// Mode requested as the new active view.
        mode: ViewMode,
    },
    /// The user requested a multiplicative zoom adjustment.
    ZoomAdjustRequested {
        /// Factor to apply to the current zoom target.
        factor: f32,
    },
    /// The user requested the camera fit the focused content.
    FitViewRequested,
    /// Planet view needs surface data the renderer does not hold yet.
    SurfaceDataNeeded {
        /// Planet whose surface grid is required.
        planet: PlanetId,
    },
    /// A surface tile (possibly with a building) was clicked.
    TileClicked {
        /// Planet whose surface was clicked.
        planet: PlanetId,
        /// Zero-based tile column.
        column: u32,
        /// Zero-based tile row.
        row: u32,
        /// Terrain occupying the clicked tile.
        terrain: TerrainKind,
        /// Building occupying the clicked tile, if any.
        building: Option<BuildingRef>,
    },
}
