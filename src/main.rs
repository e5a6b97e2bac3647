fn main() {
    maze_shooter::game::run();
}
