//! Script command parsing.
//!
//! Argument counts (after the command name):
//!
//! | Command | Args |
//! |---------|------|
//! | `insertaPersona` | 6 (profesor) / 5 (alumno) |
//! | `asignaGrupo` | 5 |
//! | `matricula` | 2 |
//! | `creaGrupoAsig` | 6 |
//! | `evalua` | 3 |
//! | `expediente` | 2 |
//! | `ocupacionAula` | 1 |

use std::path::PathBuf;

use crate::error::{Rejection, RuleResult};
use crate::rules::{
    parse_group_id, parse_number, AssignGroup, CommandTag, CreateGroup, Enroll, InsertPerson,
    Profile,
};

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    InsertPerson(InsertPerson),
    AssignGroup(AssignGroup),
    Enroll(Enroll),
    CreateGroup(CreateGroup),
    Evaluate {
        subject: String,
        theory: PathBuf,
        practice: PathBuf,
    },
    Transcript {
        student: String,
        output: PathBuf,
    },
    Occupancy {
        classroom: String,
    },
}

fn arity(args: &[String], expected: usize) -> RuleResult {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Rejection::WrongArity)
    }
}

fn profile(role: &str) -> RuleResult<Profile> {
    Profile::from_role(role).ok_or_else(|| Rejection::UnknownRole(role.to_string()))
}

impl Command {
    /// Parses the arguments of a recognized command.
    pub fn parse(tag: CommandTag, args: &[String]) -> RuleResult<Self> {
        match tag {
            CommandTag::InsertPerson => {
                let role = args.first().ok_or(Rejection::WrongArity)?;
                match profile(role)? {
                    Profile::Teacher => {
                        arity(args, 6)?;
                        Ok(Self::InsertPerson(InsertPerson::Teacher {
                            id: args[1].clone(),
                            name: args[2].clone(),
                            birth_date: args[3].clone(),
                            category: args[4].clone(),
                            department: args[5].clone(),
                        }))
                    }
                    Profile::Student => {
                        arity(args, 5)?;
                        Ok(Self::InsertPerson(InsertPerson::Student {
                            id: args[1].clone(),
                            name: args[2].clone(),
                            birth_date: args[3].clone(),
                            admission_date: args[4].clone(),
                        }))
                    }
                }
            }
            CommandTag::AssignGroup => {
                arity(args, 5)?;
                Ok(Self::AssignGroup(AssignGroup::new(
                    profile(&args[0])?,
                    args[1].as_str(),
                    args[2].as_str(),
                    args[3].as_str(),
                    parse_group_id(&args[4])?,
                )))
            }
            CommandTag::Enroll => {
                arity(args, 2)?;
                Ok(Self::Enroll(Enroll::new(args[0].as_str(), args[1].as_str())))
            }
            CommandTag::CreateGroup => {
                arity(args, 6)?;
                Ok(Self::CreateGroup(CreateGroup {
                    subject: args[0].clone(),
                    kind: args[1].clone(),
                    id: parse_group_id(&args[2])?,
                    day: args[3].clone(),
                    start_hour: parse_number("start hour", &args[4])?,
                    classroom: args[5].clone(),
                }))
            }
            CommandTag::Evaluate => {
                arity(args, 3)?;
                Ok(Self::Evaluate {
                    subject: args[0].clone(),
                    theory: PathBuf::from(&args[1]),
                    practice: PathBuf::from(&args[2]),
                })
            }
            CommandTag::Transcript => {
                arity(args, 2)?;
                Ok(Self::Transcript {
                    student: args[0].clone(),
                    output: PathBuf::from(&args[1]),
                })
            }
            CommandTag::Occupancy => {
                arity(args, 1)?;
                Ok(Self::Occupancy {
                    classroom: args[0].clone(),
                })
            }
        }
    }

    /// Tag of this command.
    pub fn tag(&self) -> CommandTag {
        match self {
            Self::InsertPerson(_) => CommandTag::InsertPerson,
            Self::AssignGroup(_) => CommandTag::AssignGroup,
            Self::Enroll(_) => CommandTag::Enroll,
            Self::CreateGroup(_) => CommandTag::CreateGroup,
            Self::Evaluate { .. } => CommandTag::Evaluate,
            Self::Transcript { .. } => CommandTag::Transcript,
            Self::Occupancy { .. } => CommandTag::Occupancy,
        }
    }
}
