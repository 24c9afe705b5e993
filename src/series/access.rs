use super::Series;

/// Who is looking at the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// Sees every series
    Staff,
    /// Sees series they organize (by username) or participate in (by id)
    Member {
        username: Option<String>,
        user_id: Option<u64>,
    },
    Anonymous,
}

impl Viewer {
    /// Build a viewer from optional CLI/config values
    pub fn from_parts(staff: bool, username: Option<&str>, user_id: Option<u64>) -> Self {
        if staff {
            return Viewer::Staff;
        }
        match (username, user_id) {
            (None, None) => Viewer::Anonymous,
            (None, Some(id)) => {
                tracing::warn!("User id {} given without a username, organizer matching disabled", id);
                Viewer::Member {
                    username: None,
                    user_id: Some(id),
                }
            }
            (Some(name), id) => {
                if id.is_none() {
                    tracing::debug!("Viewer {} has no user id, participant matching disabled", name);
                }
                Viewer::Member {
                    username: Some(name.to_string()),
                    user_id: id,
                }
            }
        }
    }

    /// Organizer matches and participant matches, merged without duplicates,
    /// in the list's original order.
    pub fn visible_series<'a>(&self, series: &'a [Series]) -> Vec<&'a Series> {
        match self {
            Viewer::Staff => series.iter().collect(),
            Viewer::Member { username, user_id } => series
                .iter()
                .filter(|s| {
                    username.as_deref() == Some(s.organizer.as_str())
                        || user_id.is_some_and(|id| s.participants.contains(&id))
                })
                .collect(),
            Viewer::Anonymous => Vec::new(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Viewer::Staff => "staff".to_string(),
            Viewer::Member {
                username: Some(name), ..
            } => name.clone(),
            Viewer::Member {
                username: None,
                user_id: Some(id),
            } => format!("user {}", id),
            Viewer::Member { .. } | Viewer::Anonymous => "anonymous".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::sample_series;

    fn mixed() -> Vec<Series> {
        vec![
            Series {
                id: 10,
                title: "a".into(),
                organizer: "yoni".into(),
                participants: vec![1, 2],
            },
            Series {
                id: 11,
                title: "b".into(),
                organizer: "dana".into(),
                participants: vec![3, u64::MAX],
            },
            Series {
                id: 12,
                title: "c".into(),
                organizer: "dana".into(),
                participants: vec![2, 4],
            },
        ]
    }

    fn member(username: Option<&str>, user_id: Option<u64>) -> Viewer {
        Viewer::Member {
            username: username.map(str::to_string),
            user_id,
        }
    }

    fn ids(viewer: &Viewer, series: &[Series]) -> Vec<u64> {
        viewer.visible_series(series).iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_staff_sees_everything() {
        let all = sample_series();
        assert_eq!(Viewer::Staff.visible_series(&all).len(), 3);
    }

    #[test]
    fn test_anonymous_sees_nothing() {
        assert!(Viewer::Anonymous.visible_series(&sample_series()).is_empty());
    }

    #[test]
    fn test_member_union_of_organizer_and_participant() {
        // 10 matches both ways and appears once
        assert_eq!(ids(&member(Some("yoni"), Some(2)), &mixed()), vec![10, 12]);
    }

    #[test]
    fn test_member_with_no_matches() {
        assert!(ids(&member(Some("nobody"), Some(99)), &mixed()).is_empty());
    }

    #[test]
    fn test_missing_user_id_matches_no_participant() {
        // No id must not match anyone, whatever their id is
        assert_eq!(ids(&member(Some("yoni"), None), &mixed()), vec![10]);
        assert_eq!(ids(&member(None, Some(u64::MAX)), &mixed()), vec![11]);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Viewer::from_parts(true, Some("x"), Some(1)), Viewer::Staff);
        assert_eq!(Viewer::from_parts(false, None, None), Viewer::Anonymous);
        assert_eq!(Viewer::from_parts(false, Some("dana"), None), member(Some("dana"), None));
        assert_eq!(ids(&Viewer::from_parts(false, Some("dana"), None), &mixed()), vec![11, 12]);
    }

    #[test]
    fn test_user_id_alone_matches_participation() {
        let viewer = Viewer::from_parts(false, None, Some(1));
        assert_eq!(viewer, member(None, Some(1)));
        assert_eq!(ids(&viewer, &sample_series()), vec![1, 2, 3]);
        assert_eq!(viewer.label(), "user 1");
    }
}
