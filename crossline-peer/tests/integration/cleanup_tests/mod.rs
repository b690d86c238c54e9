mod test_room_removed_on_exit;
