//! Path-following edit agents.
//!
//! An [`Agent`] is a cursor on the mesh: a directed `(tail, head)` edge
//! plus an optional polyedge being recorded. A program — a sequence of
//! [`Instruction`]s interpreted one at a time — steers the cursor along
//! vertex fans, records a polyedge, and commits it as a strip addition or
//! deletes the strip under the cursor. Programs make topological edits
//! reproducible: the same instruction sequence on the same mesh performs
//! the same rewrites.
//!
//! # Example
//!
//! ```
//! use quadrille::explore::{Agent, Instruction};
//! use quadrille::mesh::builder::grid;
//! use quadrille::mesh::VertexId;
//!
//! let mut mesh = grid(2, 2);
//! let mut agent = Agent::new(&mesh, VertexId::new(3), VertexId::new(4)).unwrap();
//!
//! // Record a two-edge polyedge through the interior vertex and commit
//! // it as a strip addition.
//! let edits = agent
//!     .run(
//!         &mut mesh,
//!         &[
//!             Instruction::ToggleAdd,
//!             Instruction::Forward,
//!             Instruction::ToggleAdd,
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(edits.len(), 1);
//! assert_eq!(mesh.num_faces(), 6);
//! ```

use crate::error::{MeshError, Result};
use crate::grammar::{add_strip, delete_strip, AddedStrip, VertexMerge};
use crate::mesh::{Polyedge, QuadMesh, VertexId};
use crate::strip::collect_strips;

/// One symbol of the agent's input alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Advance: the tail moves to the head, and the head rotates to the
    /// next neighbor around the far vertex's fan.
    Forward,
    /// Re-aim: the head rotates to the next neighbor around the tail's
    /// fan; the tail stays put.
    Pivot,
    /// Start recording a polyedge, or commit the recorded polyedge as a
    /// strip addition.
    ToggleAdd,
    /// Delete the strip under the cursor. Discards any recording.
    ToggleDelete,
}

/// A committed edit performed by an agent.
#[derive(Debug, Clone)]
pub enum Edit {
    /// A strip was added along the recorded polyedge.
    Added(AddedStrip),
    /// The strip under the cursor was deleted.
    Deleted(VertexMerge),
}

/// A cursor-driven editor over a quad mesh.
///
/// States: idle (not recording) and recording. The cursor always sits on an
/// existing mesh edge; commits re-home it onto the edited mesh.
#[derive(Debug, Clone)]
pub struct Agent {
    tail: VertexId,
    head: VertexId,
    recording: Option<Vec<VertexId>>,
}

impl Agent {
    /// Place an agent on the directed edge `(tail, head)`.
    pub fn new(mesh: &QuadMesh, tail: VertexId, head: VertexId) -> Result<Self> {
        if !mesh.has_edge(tail, head) {
            return Err(MeshError::CursorOffMesh { tail, head });
        }
        Ok(Self {
            tail,
            head,
            recording: None,
        })
    }

    /// The cursor's tail vertex.
    pub fn tail(&self) -> VertexId {
        self.tail
    }

    /// The cursor's head vertex.
    pub fn head(&self) -> VertexId {
        self.head
    }

    /// Whether the agent is currently recording a polyedge.
    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Interpret one instruction.
    ///
    /// Returns the committed edit, if this instruction performed one.
    pub fn step(&mut self, mesh: &mut QuadMesh, instruction: Instruction) -> Result<Option<Edit>> {
        match instruction {
            Instruction::Forward => {
                self.forward(mesh)?;
                Ok(None)
            }
            Instruction::Pivot => {
                self.pivot(mesh)?;
                Ok(None)
            }
            Instruction::ToggleAdd => self.toggle_add(mesh),
            Instruction::ToggleDelete => self.delete(mesh).map(Some),
        }
    }

    /// Interpret a whole program, collecting the committed edits.
    pub fn run(&mut self, mesh: &mut QuadMesh, program: &[Instruction]) -> Result<Vec<Edit>> {
        let mut edits = Vec::new();
        for &instruction in program {
            if let Some(edit) = self.step(mesh, instruction)? {
                edits.push(edit);
            }
        }
        Ok(edits)
    }

    fn forward(&mut self, mesh: &QuadMesh) -> Result<()> {
        let next = rotate(mesh, self.head, self.tail)?;
        self.tail = self.head;
        self.head = next;
        if let Some(polyedge) = &mut self.recording {
            polyedge.push(self.head);
        }
        Ok(())
    }

    fn pivot(&mut self, mesh: &QuadMesh) -> Result<()> {
        self.head = rotate(mesh, self.tail, self.head)?;
        if let Some(polyedge) = &mut self.recording {
            // The recorded path ends at the cursor head; re-aim it too.
            *polyedge.last_mut().expect("recording starts non-empty") = self.head;
        }
        Ok(())
    }

    fn toggle_add(&mut self, mesh: &mut QuadMesh) -> Result<Option<Edit>> {
        match self.recording.take() {
            None => {
                self.recording = Some(vec![self.tail, self.head]);
                Ok(None)
            }
            Some(recorded) => {
                let polyedge = Polyedge::new(recorded)?;
                let added = add_strip(mesh, &polyedge)?;
                // Re-home onto the left rail of the new strip.
                let left = added.left.vertices();
                self.tail = left[left.len() - 2];
                self.head = left[left.len() - 1];
                Ok(Some(Edit::Added(added)))
            }
        }
    }

    fn delete(&mut self, mesh: &mut QuadMesh) -> Result<Edit> {
        self.recording = None;
        let partition = collect_strips(mesh)?;
        let strip = partition
            .strip_of_edge(self.tail, self.head)
            .ok_or(MeshError::CursorOffMesh {
                tail: self.tail,
                head: self.head,
            })?;
        let merge = delete_strip(mesh, &partition, strip)?;

        self.tail = merge.resolve(self.tail);
        self.head = merge.resolve(self.head);
        if self.head == self.tail || !mesh.has_edge(self.tail, self.head) {
            self.head = mesh
                .vertex_neighbors(self.tail)
                .next()
                .ok_or(MeshError::CursorOffMesh {
                    tail: self.tail,
                    head: self.head,
                })?;
        }
        Ok(Edit::Deleted(merge))
    }
}

/// The neighbor following `from` in the counter-clockwise fan around
/// `center`.
fn rotate(mesh: &QuadMesh, center: VertexId, from: VertexId) -> Result<VertexId> {
    let fan = mesh.vertex_neighbors_ordered(center);
    let i = fan
        .iter()
        .position(|&n| n == from)
        .ok_or(MeshError::CursorOffMesh {
            tail: center,
            head: from,
        })?;
    Ok(fan[(i + 1) % fan.len()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::grid;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_forward_walks_edges() {
        let mesh = grid(2, 2);
        let mut agent = Agent::new(&mesh, v(0), v(1)).unwrap();
        let mut mesh = mesh;

        agent.step(&mut mesh, Instruction::Forward).unwrap();
        assert_eq!(agent.tail(), v(1));
        assert!(mesh.has_edge(agent.tail(), agent.head()));

        agent.step(&mut mesh, Instruction::Forward).unwrap();
        assert!(mesh.has_edge(agent.tail(), agent.head()));
    }

    #[test]
    fn test_pivot_keeps_tail() {
        let mut mesh = grid(2, 2);
        let mut agent = Agent::new(&mesh, v(4), v(1)).unwrap();

        let degree = mesh.vertex_degree(v(4));
        let mut seen = vec![agent.head()];
        for _ in 1..degree {
            agent.step(&mut mesh, Instruction::Pivot).unwrap();
            assert_eq!(agent.tail(), v(4));
            seen.push(agent.head());
        }
        // A full round of pivots visits every neighbor once
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), degree);
    }

    #[test]
    fn test_record_and_commit_addition() {
        let mut mesh = grid(2, 2);
        let mut agent = Agent::new(&mesh, v(3), v(4)).unwrap();

        let edits = agent
            .run(
                &mut mesh,
                &[
                    Instruction::ToggleAdd,
                    Instruction::Forward,
                    Instruction::ToggleAdd,
                ],
            )
            .unwrap();

        assert_eq!(edits.len(), 1);
        assert!(matches!(edits[0], Edit::Added(_)));
        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_vertices(), 12);
        assert!(!agent.is_recording());
        // The cursor sits on the new left rail
        assert!(mesh.has_edge(agent.tail(), agent.head()));
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut mesh = grid(2, 2);
        let mut agent = Agent::new(&mesh, v(0), v(1)).unwrap();

        let edits = agent.run(&mut mesh, &[Instruction::ToggleDelete]).unwrap();

        assert_eq!(edits.len(), 1);
        assert_eq!(mesh.num_faces(), 2);
        // The cursor was remapped onto the surviving mesh
        assert!(mesh.has_vertex(agent.tail()));
        assert!(mesh.has_edge(agent.tail(), agent.head()));
    }

    #[test]
    fn test_program_reproducibility() {
        let program = [
            Instruction::ToggleAdd,
            Instruction::Forward,
            Instruction::ToggleAdd,
            Instruction::Forward,
            Instruction::ToggleDelete,
        ];

        let run = || {
            let mut mesh = grid(2, 2);
            let mut agent = Agent::new(&mesh, v(3), v(4)).unwrap();
            agent.run(&mut mesh, &program).unwrap();
            (mesh.num_vertices(), mesh.num_faces(), mesh.num_edges())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_cursor_off_mesh_rejected() {
        let mesh = grid(2, 2);
        assert!(matches!(
            Agent::new(&mesh, v(0), v(8)),
            Err(MeshError::CursorOffMesh { .. })
        ));
    }
}
